//! Configuración de rutas: directorio de datos, hojas de origen y catálogo.
//!
//! Variables de entorno (también se leen desde `.env`):
//! - `QUICKAUDIT_DATA_DIR`: directorio base de datos
//! - `QUICKAUDIT_SOURCE_DIR`: directorio con las hojas de requisitos
//! - `QUICKAUDIT_CATALOG`: ruta del catálogo normalizado

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "QUICKAUDIT_DATA_DIR";
pub const SOURCE_DIR_ENV: &str = "QUICKAUDIT_SOURCE_DIR";
pub const CATALOG_ENV: &str = "QUICKAUDIT_CATALOG";

/// Nombre del catálogo dentro de `<data>/normalized`
pub const CATALOG_FILE_NAME: &str = "MajorSpecificRequirements.JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub data_dir: PathBuf,
    pub source_dir: PathBuf,
    pub catalog_path: PathBuf,
}

impl AuditConfig {
    /// Resuelve la configuración desde el entorno, relativa al directorio actual.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Versión parametrizable para pruebas: `lookup` reemplaza a `std::env::var`.
    pub fn from_lookup<F>(lookup: F, base: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_dir = match non_empty(DATA_DIR_ENV) {
            Some(p) => PathBuf::from(p),
            None => default_data_dir(base),
        };
        let source_dir = non_empty(SOURCE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("modified"));
        let catalog_path = non_empty(CATALOG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("normalized").join(CATALOG_FILE_NAME));

        tracing::debug!(
            data_dir = %data_dir.display(),
            source_dir = %source_dir.display(),
            catalog = %catalog_path.display(),
            "config_resolved"
        );
        AuditConfig { data_dir, source_dir, catalog_path }
    }
}

// Primer candidato existente desde `base`; si ninguno existe, `<base>/data`
fn default_data_dir(base: &Path) -> PathBuf {
    let candidates = [base.join("backend").join("data"), base.join("data")];
    for candidate in candidates.iter() {
        if candidate.is_dir() {
            return candidate.clone();
        }
    }
    base.join("data")
}
