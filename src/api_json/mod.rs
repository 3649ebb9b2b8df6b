use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};
use crate::models::TranscriptRow;

/// Tipo de grado usado cuando la petición no lo indica
pub const DEFAULT_DEGREE_TYPE: &str = "BA";

/// Parámetros de entrada para calcular el avance en un major
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "major": "Economics",
///   "degreeType": "BS",
///   "studentCourses": [
///     { "courseId": "ECON 101", "grade": "A", "credits": 4 },
///     { "subject": "MATH", "number": "221", "grade": "B", "credits": 5 },
///     { "courseId": "ECON 301", "grade": "INP", "credits": 3 }
///   ]
/// }
/// ```
///
/// # Campos:
/// - `major`: Nombre del major tal como aparece en el catálogo (requerido)
/// - `degreeType`: Tipo de grado, sólo se devuelve en la respuesta (opcional, "BA" por defecto)
/// - `studentCourses`: Filas del expediente (requerido). Cada fila trae `courseId`
///   o `subject` + `number`, además de `grade` y `credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub degree_type: Option<String>,
    #[serde(default)]
    pub student_courses: Option<Vec<TranscriptRow>>,
}

impl ProgressRequest {
    pub fn degree_type_or_default(&self) -> &str {
        match self.degree_type.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => DEFAULT_DEGREE_TYPE,
        }
    }

    pub fn rows(&self) -> &[TranscriptRow] {
        self.student_courses.as_deref().unwrap_or(&[])
    }
}

/// Parámetros para el ranking de majors de un mismo expediente
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    #[serde(default)]
    pub degree_type: Option<String>,
    pub student_courses: Vec<TranscriptRow>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

pub fn parse_json_input(json_str: &str) -> std::result::Result<ProgressRequest, serde_json::Error> {
    serde_json::from_str::<ProgressRequest>(json_str)
}

/// Parsea y valida una petición de avance: `major` no vacío y `studentCourses` presente.
pub fn parse_progress_request(json_str: &str) -> Result<ProgressRequest> {
    let request = parse_json_input(json_str).map_err(|e| AuditError::InvalidRequest(format!("failed to parse input: {}", e)))?;
    validate_progress_request(request)
}

pub fn validate_progress_request(request: ProgressRequest) -> Result<ProgressRequest> {
    if request.major.trim().is_empty() || request.student_courses.is_none() {
        return Err(AuditError::InvalidRequest("major and studentCourses[] are required".to_string()));
    }
    Ok(request)
}

/// Parsea un arreglo JSON de filas del expediente.
pub fn parse_transcript_rows(json_str: &str) -> Result<Vec<TranscriptRow>> {
    serde_json::from_str::<Vec<TranscriptRow>>(json_str)
        .map_err(|e| AuditError::InvalidRequest(format!("studentCourses must be a JSON array of rows: {}", e)))
}

pub fn parse_rank_request(json_str: &str) -> Result<RankRequest> {
    serde_json::from_str::<RankRequest>(json_str).map_err(|e| AuditError::InvalidRequest(format!("failed to parse input: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress_request_completo() {
        let json_data = r#"
        {
            "major": "Economics",
            "degreeType": "BS",
            "studentCourses": [
                { "courseId": "ECON 101", "grade": "A", "credits": 4 },
                { "subject": "MATH", "number": 221, "grade": "B", "credits": "5" }
            ]
        }
        "#;

        let req = parse_progress_request(json_data).expect("Debe parsear la petición");
        assert_eq!(req.major, "Economics");
        assert_eq!(req.degree_type_or_default(), "BS");
        assert_eq!(req.rows().len(), 2);
    }

    #[test]
    fn test_degree_type_por_defecto() {
        let req = parse_progress_request(r#"{"major": "Economics", "studentCourses": []}"#).unwrap();
        assert_eq!(req.degree_type_or_default(), "BA");

        let req = parse_progress_request(r#"{"major": "Economics", "degreeType": " ", "studentCourses": []}"#).unwrap();
        assert_eq!(req.degree_type_or_default(), "BA");
    }

    #[test]
    fn test_campos_requeridos() {
        assert!(matches!(
            parse_progress_request(r#"{"studentCourses": []}"#),
            Err(AuditError::InvalidRequest(_))
        ));
        assert!(matches!(
            parse_progress_request(r#"{"major": "Economics"}"#),
            Err(AuditError::InvalidRequest(_))
        ));
        assert!(matches!(parse_progress_request("not json"), Err(AuditError::InvalidRequest(_))));
    }
}
