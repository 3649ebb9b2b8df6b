use strsim::jaro_winkler;

use crate::algorithm::evaluators::evaluate_group;
use crate::algorithm::pool::AvailablePool;
use crate::algorithm::transcript::parse_transcript;
use crate::catalog::{canon, strip_degree_suffix};
use crate::error::{AuditError, Result};
use crate::models::{GroupResult, Major, MajorProgressResult, StudentCourse, TranscriptRow};

/// Similitud mínima para sugerir un major cuando la búsqueda falla
const SUGGESTION_THRESHOLD: f64 = 0.85;
const MAX_SUGGESTIONS: usize = 3;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ratio publicado en el resultado del grupo: 4 decimales. La media usa el exacto.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10_000.0).round() / 10_000.0
}

/// Busca un major por nombre canónico. Si no hay coincidencia exacta se
/// reintenta sin el sufijo de grado ("Economics, BS" => "Economics").
pub fn find_major<'a>(catalog: &'a [Major], major: &str) -> Result<&'a Major> {
    let key = canon(major);
    if let Some(m) = catalog.iter().find(|m| canon(&m.major) == key) {
        return Ok(m);
    }
    let stripped = canon(&strip_degree_suffix(major));
    if let Some(m) = catalog.iter().find(|m| canon(&m.major) == stripped) {
        return Ok(m);
    }

    let mut scored: Vec<(f64, &str)> = catalog
        .iter()
        .map(|m| (jaro_winkler(&stripped, &canon(&m.major)), m.major.as_str()))
        .filter(|(s, _)| *s >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    Err(AuditError::MajorNotFound {
        major: major.to_string(),
        suggestions: scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, m)| m.to_string()).collect(),
    })
}

/// Media de los ratios × 100, redondeada a 2 decimales; 0 si no hay grupos.
pub fn completion_percent(ratios: &[f64]) -> f64 {
    if ratios.is_empty() {
        return 0.0;
    }
    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    round2(mean * 100.0).clamp(0.0, 100.0)
}

/// Evalúa un major ya localizado contra los cursos del estudiante.
///
/// Los grupos se recorren en el orden del catálogo: los primeros tienen
/// prioridad sobre los cursos compartidos, y un curso usado por un grupo ya
/// no está disponible para los siguientes.
pub fn evaluate_major(major: &Major, degree_type: &str, courses: &[StudentCourse]) -> MajorProgressResult {
    let mut pool = AvailablePool::from_courses(courses);
    let mut group_results: Vec<GroupResult> = Vec::with_capacity(major.requirement_groups.len());
    let mut ratios: Vec<f64> = Vec::with_capacity(major.requirement_groups.len());

    for group in &major.requirement_groups {
        let outcome = evaluate_group(group, &pool);
        pool = pool.consume(&outcome.used);
        ratios.push(outcome.ratio);
        group_results.push(GroupResult {
            group_id: group.group_id.clone(),
            rule_type: group.rule_type(),
            completion_ratio: round_ratio(outcome.ratio),
            used_courses: outcome.used,
            detail: outcome.detail,
        });
    }

    MajorProgressResult {
        major: major.major.clone(),
        degree_type: degree_type.to_string(),
        major_completion_percent: completion_percent(&ratios),
        evaluated_groups: group_results.len(),
        group_results,
    }
}

/// Calcula el avance del estudiante en un major del catálogo.
///
/// Falla sólo si el major no existe; en ese caso no hay resultado parcial.
pub fn evaluate_major_progress(
    catalog: &[Major],
    major: &str,
    degree_type: &str,
    student_rows: &[TranscriptRow],
) -> Result<MajorProgressResult> {
    let major_obj = find_major(catalog, major)?;
    let courses = parse_transcript(student_rows);
    Ok(evaluate_major(major_obj, degree_type, &courses))
}
