// Biblioteca raíz del crate `quickaudit`.
// Normaliza las hojas de requisitos por major en un catálogo de reglas y
// evalúa el expediente de un estudiante contra ese catálogo.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;

pub use algorithm::{evaluate_major_progress, list_majors, rank_majors};
pub use catalog::{build_catalog, load_catalog, normalize_dir, write_catalog};
pub use error::{AuditError, Result};
