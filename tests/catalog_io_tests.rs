use quickaudit::catalog::{load_catalog, normalize_dir, read_requirement_rows, read_source_dir, write_catalog};
use quickaudit::error::AuditError;
use quickaudit::models::{Major, RequirementGroup, Rule, RuleType};
use std::fs;
use std::path::{Path, PathBuf};

// Directorio temporal propio de cada test
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quickaudit_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const CSV: &str = "Major,Group ID,Course,Credits Required\n\
Economics,1,ECON 101,C1\n\
\"Economics, BS\",2,MATH 221 & MATH 222,C1\n\
Economics,3,ECON 301,12\n\
Economics,3,ECON 302,12\n";

#[test]
fn test_lee_csv_por_encabezados() {
    let dir = temp_dir("csv_rows");
    let path = dir.join("reqs.csv");
    fs::write(&path, CSV).unwrap();

    let rows = read_requirement_rows(&path).expect("Debe leer el CSV");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1].major, "Economics, BS");
    assert_eq!(rows[1].course, "MATH 221 & MATH 222");
    assert_eq!(rows[0].source, "reqs.csv");
    assert_eq!(rows[3].requirement_token, "12");
}

#[test]
fn test_normalize_dir_escribe_catalogo() {
    let dir = temp_dir("normalize_dir");
    let source = dir.join("modified");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("a.csv"), CSV).unwrap();
    fs::write(source.join("notas.txt"), "no es un csv").unwrap();
    let output = dir.join("normalized").join("MajorSpecificRequirements.JSON");

    let n = normalize_dir(&source, &output).expect("Debe normalizar");
    assert_eq!(n.majors.len(), 1);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\"ruleType\": \"min_credits\""));

    let loaded = load_catalog(&output).unwrap();
    assert_eq!(loaded, n.majors);
    assert_eq!(loaded[0].requirement_groups[2].rule, Rule::MinCredits { required_credits: 12 });
}

#[test]
fn test_directorio_vacio_da_catalogo_vacio() {
    let dir = temp_dir("empty_source");
    assert!(read_source_dir(&dir).unwrap().is_empty());
}

#[test]
fn test_directorio_inexistente_es_error() {
    let dir = temp_dir("missing_source").join("no_existe");
    assert!(matches!(read_source_dir(&dir), Err(AuditError::Io { .. })));
}

#[test]
fn test_write_y_load_manual_review() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("catalog.json");
    let majors = vec![Major {
        major: "Biology".to_string(),
        requirement_groups: vec![RequirementGroup {
            group_id: "1".to_string(),
            rule: Rule::ManualReview { raw_tokens: vec!["4.5".to_string(), "C2".to_string()] },
            courses: vec!["BIO 101".to_string()],
        }],
    }];
    write_catalog(&path, &majors).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"rawRequirementTokens\""));
    assert!(text.contains("\"requiredCount\": null"));
    assert_eq!(load_catalog(&path).unwrap(), majors);
}

#[test]
fn test_load_tolerante() {
    let dir = temp_dir("tolerant");
    let path = dir.join("catalog.json");
    fs::write(
        &path,
        r#"[{"major": "Biology", "requirementGroups": [
            {"groupId": "1", "ruleType": "something_else", "courses": ["BIO 101"]},
            {"groupId": "2", "ruleType": "choose_n_courses", "courses": ["BIO 102"]}
        ]}]"#,
    )
    .unwrap();

    let loaded = load_catalog(&path).unwrap();
    let groups = &loaded[0].requirement_groups;
    assert_eq!(groups[0].rule_type(), RuleType::ManualReview);
    assert_eq!(groups[1].rule, Rule::ChooseNCourses { required_count: 0 });
}

#[test]
fn test_load_json_invalido() {
    let dir = temp_dir("bad_json");
    let path = dir.join("catalog.json");
    fs::write(&path, "{ no es json").unwrap();
    assert!(matches!(load_catalog(&path), Err(AuditError::Json { .. })));
}

#[test]
fn test_csv_con_campos_sobrantes_conserva_filas() {
    let dir = temp_dir("ragged");
    let path = dir.join("reqs.csv");
    fs::write(
        &path,
        "Major,Group ID,Course,Credits Required\nEconomics,1,ECON 101,C1\nEconomics,1,ECON 102,C1,extra\n",
    )
    .unwrap();

    let rows = read_requirement_rows(&path).expect("Un campo de más no debe rechazar el fichero");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].course, "ECON 102");
    assert_eq!(rows[1].requirement_token, "C1");
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

#[test]
fn test_lee_xlsx_por_encabezados() {
    // encabezados en otro orden, con mayúsculas y espacios, más una columna extra
    let rows = read_requirement_rows(&fixture("requisitos.xlsx")).expect("Debe leer el Excel");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].source, "requisitos.xlsx");
    assert_eq!(rows[0].major, "Economics, BS");
    assert_eq!(rows[0].group_id, "1");
    assert_eq!(rows[1].course, "MATH 222 & MATH 234");
    // celdas numéricas salen sin ".0"
    assert_eq!(rows[2].group_id, "2");
    assert_eq!(rows[2].requirement_token, "12");
}

#[test]
fn test_xlsx_sin_columna_major() {
    let rows = read_requirement_rows(&fixture("sin_major.xlsx")).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.major.is_empty()));
    assert_eq!(rows[0].course, "BIO 101");
}

#[test]
fn test_normaliza_directorio_con_excel() {
    let dir = temp_dir("xlsx_dir");
    let source = dir.join("modified");
    fs::create_dir_all(&source).unwrap();
    fs::copy(fixture("requisitos.xlsx"), source.join("requisitos.xlsx")).unwrap();
    fs::copy(fixture("sin_major.xlsx"), source.join("sin_major.xlsx")).unwrap();
    let output = dir.join("catalog.json");

    let n = normalize_dir(&source, &output).unwrap();
    assert_eq!(n.majors.len(), 1);
    let groups = &n.majors[0].requirement_groups;
    assert_eq!(groups[0].rule, Rule::ChooseNCourses { required_count: 2 });
    assert_eq!(groups[1].rule, Rule::MinCredits { required_credits: 12 });

    let skipped = n
        .diagnostics
        .iter()
        .filter(|d| matches!(d, quickaudit::diagnostics::Diagnostic::SkippedIncompleteRow { .. }))
        .count();
    assert_eq!(skipped, 2);
}
