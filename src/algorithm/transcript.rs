use serde_json::Value;

use crate::catalog::canon;
use crate::models::{StudentCourse, TranscriptRow};

/// Notas que indican curso en progreso o retirado (no cuentan como completado)
pub const IN_PROGRESS_GRADES: [&str; 4] = ["INP", "IP", "W", "UW"];

/// Convierte un valor JSON suelto a String (números enteros sin ".0")
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

// Créditos como número real; ausente, no numérico, negativo o no finito => 0
fn parse_credits(v: Option<&Value>) -> f64 {
    let parsed = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(c) if c.is_finite() && c > 0.0 => c,
        _ => 0.0,
    }
}

/// Id del curso: `courseId` si viene informado; si no, `subject` + " " + `number`.
pub fn row_course_id(row: &TranscriptRow) -> String {
    let explicit = row.course_id.as_ref().map(value_to_string).unwrap_or_default();
    if !explicit.is_empty() {
        return canon(&explicit);
    }
    let subject = row.subject.as_ref().map(value_to_string).unwrap_or_default();
    let number = row.number.as_ref().map(value_to_string).unwrap_or_default();
    canon(&format!("{} {}", subject, number))
}

/// Convierte una fila del expediente en un curso canónico.
pub fn parse_transcript_row(row: &TranscriptRow) -> StudentCourse {
    let grade = row.grade.as_ref().map(value_to_string).unwrap_or_default().to_uppercase();
    StudentCourse {
        course_id: row_course_id(row),
        credits: parse_credits(row.credits.as_ref()),
        completed: !IN_PROGRESS_GRADES.contains(&grade.as_str()),
    }
}

/// Convierte el expediente completo (se conservan también los no completados).
pub fn parse_transcript(rows: &[TranscriptRow]) -> Vec<StudentCourse> {
    rows.iter().map(parse_transcript_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> TranscriptRow {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn course_id_explicito() {
        let c = parse_transcript_row(&row(json!({"courseId": " comp  sci 300 ", "grade": "A", "credits": 3})));
        assert_eq!(c.course_id, "COMP SCI 300");
        assert_eq!(c.credits, 3.0);
        assert!(c.completed);
    }

    #[test]
    fn subject_y_number() {
        let c = parse_transcript_row(&row(json!({"subject": "math", "number": 221, "grade": "B", "credits": "5"})));
        assert_eq!(c.course_id, "MATH 221");
        assert_eq!(c.credits, 5.0);
    }

    #[test]
    fn notas_en_progreso() {
        for g in ["INP", "ip", " w ", "UW"] {
            let c = parse_transcript_row(&row(json!({"courseId": "X 1", "grade": g})));
            assert!(!c.completed, "{} no debería contar como completado", g);
        }
        // sin nota => completado
        assert!(parse_transcript_row(&row(json!({"courseId": "X 1"}))).completed);
    }

    #[test]
    fn creditos_por_defecto() {
        assert_eq!(parse_transcript_row(&row(json!({"courseId": "X 1"}))).credits, 0.0);
        assert_eq!(parse_transcript_row(&row(json!({"courseId": "X 1", "credits": "tres"}))).credits, 0.0);
        assert_eq!(parse_transcript_row(&row(json!({"courseId": "X 1", "credits": null}))).credits, 0.0);
        assert_eq!(parse_transcript_row(&row(json!({"courseId": "X 1", "credits": 2.5}))).credits, 2.5);
    }

    #[test]
    fn course_id_vacio_usa_subject() {
        let c = parse_transcript_row(&row(json!({"courseId": "", "subject": "STAT", "number": "301"})));
        assert_eq!(c.course_id, "STAT 301");
    }
}
