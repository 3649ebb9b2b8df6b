use crate::algorithm::progress::evaluate_major;
use crate::algorithm::transcript::parse_transcript;
use crate::models::{Major, MajorRanking, TranscriptRow};

/// Cantidad de majors devueltos por defecto en el ranking
pub const DEFAULT_TOP_N: usize = 5;

/// Nombres de los majors del catálogo en orden alfabético.
pub fn list_majors(catalog: &[Major]) -> Vec<String> {
    let mut names: Vec<String> = catalog.iter().map(|m| m.major.clone()).collect();
    names.sort();
    names
}

/// Evalúa el mismo expediente contra todos los majors y devuelve los `top_n`
/// con mayor avance (empates por nombre). Cada major usa su propio pool.
pub fn rank_majors(catalog: &[Major], degree_type: &str, student_rows: &[TranscriptRow], top_n: usize) -> Vec<MajorRanking> {
    let courses = parse_transcript(student_rows);

    let mut results: Vec<MajorRanking> = catalog
        .iter()
        .map(|major| {
            let progress = evaluate_major(major, degree_type, &courses);
            let satisfied_groups = progress.group_results.iter().filter(|g| g.completion_ratio >= 1.0).count();
            MajorRanking {
                major: progress.major,
                degree_type: progress.degree_type,
                percent: progress.major_completion_percent,
                satisfied_groups,
                total_groups: progress.evaluated_groups,
            }
        })
        .collect();

    results.sort_by(|a, b| b.percent.total_cmp(&a.percent).then_with(|| a.major.cmp(&b.major)));
    results.truncate(top_n);
    results
}
