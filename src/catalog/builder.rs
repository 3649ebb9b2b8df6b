//! Agrupación de filas y construcción de reglas.
//!
//! Las filas se agrupan por (fichero, major canónico, group id): cada fichero
//! aporta sus propios grupos al major y después se eliminan los grupos
//! estructuralmente idénticos. Para cada grupo se clasifican sus tokens y se
//! decide la regla:
//! - algún token malformado => `manual_review`
//! - todos `C<n>` con el mismo n => `choose_n_courses`
//! - todos créditos con el mismo valor => `min_credits`
//! - tipos mezclados o valores distintos => `manual_review`

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::io::RawRequirementRow;
use crate::catalog::names::{canon, strip_degree_suffix};
use crate::catalog::token::{classify_token, token_diagnostic};
use crate::diagnostics::{Diagnostic, ManualReviewCause};
use crate::models::{Major, RequirementGroup, RequirementToken, Rule, TokenKind};

/// Resultado de la normalización: catálogo ordenado + diagnósticos.
#[derive(Debug, Clone, Default)]
pub struct Normalization {
    pub majors: Vec<Major>,
    pub diagnostics: Vec<Diagnostic>,
}

// Filas de un major mientras se agrupan, en orden de primera aparición
struct MajorRows<'a> {
    display: String,
    key: String,
    groups: Vec<(String, Vec<&'a RawRequirementRow>)>,
    // (fichero de origen, group id) => posición en `groups`
    group_index: HashMap<(String, String), usize>,
}

/// Decide la regla de un grupo a partir de sus tokens ya clasificados.
pub fn classify_rule(tokens: &[RequirementToken]) -> Result<Rule, ManualReviewCause> {
    if tokens.iter().any(RequirementToken::is_malformed) {
        return Err(ManualReviewCause::MalformedToken);
    }

    if !tokens.is_empty() && tokens.iter().all(|t| matches!(t.kind, TokenKind::Choose { .. })) {
        let counts: BTreeSet<i64> = tokens.iter().filter_map(RequirementToken::required_count).collect();
        if let [required_count] = counts.into_iter().collect::<Vec<_>>()[..] {
            return Ok(Rule::ChooseNCourses { required_count });
        }
    }

    if !tokens.is_empty() && tokens.iter().all(|t| matches!(t.kind, TokenKind::Credits { .. })) {
        let credits: BTreeSet<i64> = tokens.iter().filter_map(RequirementToken::required_credits).collect();
        if let [required_credits] = credits.into_iter().collect::<Vec<_>>()[..] {
            return Ok(Rule::MinCredits { required_credits });
        }
    }

    Err(ManualReviewCause::MixedRule)
}

/// Quita cursos repetidos manteniendo el orden de primera aparición.
/// Devuelve también cuántos se descartaron.
pub fn dedupe_courses<I>(courses: I) -> (Vec<String>, usize)
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    let mut duplicates = 0usize;
    for course in courses {
        if seen.contains(&course) {
            duplicates += 1;
            continue;
        }
        seen.insert(course.clone());
        unique.push(course);
    }
    (unique, duplicates)
}

/// Clave de orden de grupos: primero los ids con dígitos (comparando los dígitos
/// rellenados con ceros a 12), luego el resto en orden lexicográfico.
pub fn group_sort_key(group_id: &str) -> (u8, String) {
    let digits: String = group_id.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        (1, group_id.to_string())
    } else {
        (0, format!("{:0>12}", digits))
    }
}

/// Construye un grupo normalizado a partir de sus filas.
pub fn normalize_group(
    major: &str,
    group_id: &str,
    rows: &[&RawRequirementRow],
    diagnostics: &mut Vec<Diagnostic>,
) -> RequirementGroup {
    let tokens: Vec<RequirementToken> = rows.iter().map(|r| classify_token(&r.requirement_token)).collect();
    diagnostics.extend(tokens.iter().filter_map(token_diagnostic));

    let (courses, duplicates) = dedupe_courses(rows.iter().map(|r| canon(&r.course)));
    if duplicates > 0 {
        diagnostics.push(Diagnostic::DuplicateCoursesRemoved {
            major: major.to_string(),
            group_id: group_id.to_string(),
            duplicates,
        });
    }

    let rule = match classify_rule(&tokens) {
        Ok(rule) => rule,
        Err(cause) => {
            let raw_tokens: Vec<String> = tokens
                .iter()
                .map(|t| t.raw_text.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            diagnostics.push(Diagnostic::ManualReviewRule {
                major: major.to_string(),
                group_id: group_id.to_string(),
                cause,
                raw_tokens: raw_tokens.clone(),
            });
            Rule::ManualReview { raw_tokens }
        }
    };

    RequirementGroup { group_id: group_id.to_string(), rule, courses }
}

/// Ordena los grupos de un major y elimina los estructuralmente idénticos.
/// A igual clave de orden se conserva el orden de entrada.
pub fn sort_and_dedupe_groups(
    major: &str,
    groups: Vec<RequirementGroup>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<RequirementGroup> {
    let mut indexed: Vec<(usize, RequirementGroup)> = groups.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        group_sort_key(&a.group_id)
            .cmp(&group_sort_key(&b.group_id))
            .then(ia.cmp(ib))
    });

    let mut unique: Vec<RequirementGroup> = Vec::new();
    for (_, group) in indexed {
        if unique.contains(&group) {
            diagnostics.push(Diagnostic::DuplicateGroupRemoved {
                major: major.to_string(),
                group_id: group.group_id.clone(),
            });
            continue;
        }
        unique.push(group);
    }
    unique
}

/// Normaliza todas las filas de origen en el catálogo de majors.
///
/// Las filas sin major, group id o curso se descartan con un diagnóstico.
/// Un mismo group id en dos ficheros da dos grupos; si son idénticos queda uno.
/// El resultado es determinista: las mismas filas producen el mismo catálogo.
pub fn build_catalog(rows: &[RawRequirementRow]) -> Normalization {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut majors: Vec<MajorRows> = Vec::new();
    let mut major_index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        if row.major.is_empty() || row.group_id.is_empty() || row.course.is_empty() {
            diagnostics.push(Diagnostic::SkippedIncompleteRow {
                source: row.source.clone(),
                major: row.major.clone(),
                group_id: row.group_id.clone(),
                course: row.course.clone(),
            });
            continue;
        }

        let cleaned = strip_degree_suffix(&row.major);
        let key = canon(&cleaned);
        let mi = *major_index.entry(key.clone()).or_insert_with(|| {
            majors.push(MajorRows { display: cleaned.clone(), key, groups: Vec::new(), group_index: HashMap::new() });
            majors.len() - 1
        });

        let entry = &mut majors[mi];
        let group_key = (row.source.clone(), row.group_id.clone());
        let gi = match entry.group_index.get(&group_key) {
            Some(gi) => *gi,
            None => {
                entry.groups.push((row.group_id.clone(), Vec::new()));
                entry.group_index.insert(group_key, entry.groups.len() - 1);
                entry.groups.len() - 1
            }
        };
        entry.groups[gi].1.push(row);
    }

    majors.sort_by(|a, b| a.display.cmp(&b.display).then_with(|| a.key.cmp(&b.key)));

    let mut out: Vec<Major> = Vec::with_capacity(majors.len());
    for m in majors {
        let groups: Vec<RequirementGroup> = m
            .groups
            .iter()
            .map(|(group_id, group_rows)| normalize_group(&m.display, group_id, group_rows, &mut diagnostics))
            .collect();
        let requirement_groups = sort_and_dedupe_groups(&m.display, groups, &mut diagnostics);
        out.push(Major { major: m.display, requirement_groups });
    }

    Normalization { majors: out, diagnostics }
}
