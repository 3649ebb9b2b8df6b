//! Módulo `catalog`: construcción del catálogo normalizado de requisitos.
//!
//! Submódulos:
//! - `names`: canonicalización de ids y nombres de major
//! - `token`: clasificación de tokens de "Credits Required"
//! - `io`: lectura de hojas de origen (CSV/Excel) y del catálogo JSON
//! - `builder`: agrupación de filas y construcción de reglas

pub mod builder;
pub mod io;
mod names;
mod token;

pub use builder::{build_catalog, Normalization};
pub use io::{catalog_to_json, load_catalog, read_requirement_rows, read_source_dir, write_catalog, RawRequirementRow};
pub use names::{canon, strip_degree_suffix};
pub use token::{classify_token, token_diagnostic};

use std::path::Path;

use crate::error::Result;

/// Lee el directorio de origen, normaliza y escribe el catálogo.
/// Devuelve la normalización para que quien llama muestre los diagnósticos.
pub fn normalize_dir(source_dir: &Path, output: &Path) -> Result<Normalization> {
    let rows = read_source_dir(source_dir)?;
    let normalization = build_catalog(&rows);
    write_catalog(output, &normalization.majors)?;
    Ok(normalization)
}
