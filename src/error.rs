use std::path::PathBuf;
use thiserror::Error;

/// Errores de la biblioteca. Sólo `MajorNotFound` es un fallo del núcleo;
/// el resto viene de la lectura/escritura de ficheros o de peticiones mal formadas.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Major not found in requirements: {major}{}", format_suggestions(.suggestions))]
    MajorNotFound { major: String, suggestions: Vec<String> },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AuditError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuditError::MajorNotFound { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensaje_incluye_sugerencias() {
        let e = AuditError::MajorNotFound {
            major: "Economic".to_string(),
            suggestions: vec!["Economics".to_string()],
        };
        assert_eq!(e.to_string(), "Major not found in requirements: Economic (did you mean: Economics?)");
        assert!(e.is_not_found());
    }

    #[test]
    fn mensaje_sin_sugerencias() {
        let e = AuditError::MajorNotFound { major: "Basket Weaving".to_string(), suggestions: vec![] };
        assert_eq!(e.to_string(), "Major not found in requirements: Basket Weaving");
    }
}
