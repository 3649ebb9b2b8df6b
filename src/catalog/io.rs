use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AuditError, Result};
use crate::models::Major;

/// Encabezados esperados en las hojas de requisitos
pub const HEADER_MAJOR: &str = "Major";
pub const HEADER_GROUP_ID: &str = "Group ID";
pub const HEADER_COURSE: &str = "Course";
pub const HEADER_CREDITS_REQUIRED: &str = "Credits Required";

const SPREADSHEET_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "ods"];

/// Fila de origen ya recortada. Un campo ausente queda como cadena vacía.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRequirementRow {
    /// Nombre del fichero de origen (sólo para diagnósticos)
    pub source: String,
    pub major: String,
    pub group_id: String,
    pub course: String,
    pub requirement_token: String,
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Convierte un `Data` de calamine a String (los enteros guardados como float salen sin ".0")
pub fn data_to_string(d: &Data) -> String {
    match d {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(path: &Path) -> String {
    path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

fn is_source_file(path: &Path) -> bool {
    let ext = extension_of(path);
    ext == "csv" || SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
}

/// Ficheros de requisitos (`*.csv`, `*.xlsx`, `*.xls`, `*.ods`) de un directorio,
/// ordenados por nombre. Se ignoran ocultos y temporales de editor.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|source| AuditError::Io { path: dir.to_path_buf(), source })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in read.flatten() {
        let p = entry.path();
        if !p.is_file() { continue; }
        let name = source_name(&p);
        if name.starts_with('.') || name.starts_with('~') || name.ends_with('~') { continue; }
        if is_source_file(&p) {
            files.push(p);
        }
    }
    files.sort();
    Ok(files)
}

/// Lee las filas de un fichero de requisitos según su extensión.
pub fn read_requirement_rows(path: &Path) -> Result<Vec<RawRequirementRow>> {
    if SPREADSHEET_EXTENSIONS.contains(&extension_of(path).as_str()) {
        read_sheet_rows(path)
    } else {
        read_csv_rows(path)
    }
}

/// Lee todas las filas de todos los ficheros del directorio. Un fichero que no
/// se puede leer se omite con un aviso: la normalización siempre termina.
pub fn read_source_dir(dir: &Path) -> Result<Vec<RawRequirementRow>> {
    let mut rows = Vec::new();
    for path in source_files(dir)? {
        match read_requirement_rows(&path) {
            Ok(mut file_rows) => {
                tracing::debug!(file = %path.display(), rows = file_rows.len(), "source_file_read");
                rows.append(&mut file_rows);
            }
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "source_file_skipped"),
        }
    }
    Ok(rows)
}

// Valores de una columna buscada por encabezado; columna ausente => vacíos
fn column_strings(df: &DataFrame, header: &str) -> Vec<String> {
    let wanted = normalize_header(header);
    let found = df
        .get_column_names()
        .into_iter()
        .find(|name| normalize_header(name.as_str()) == wanted)
        .cloned();

    let column = match found.as_ref().and_then(|name| df.column(name.as_str()).ok()) {
        Some(c) => c,
        None => return vec![String::new(); df.height()],
    };
    match column.as_materialized_series().str() {
        Ok(values) => values
            .into_iter()
            .map(|v| v.unwrap_or("").trim().to_string())
            .collect(),
        Err(_) => vec![String::new(); df.height()],
    }
}

/// Lee un CSV con encabezados `Major, Group ID, Course, Credits Required`.
/// Todas las columnas se leen como texto. Los campos sobrantes de una fila se
/// descartan en vez de rechazar el fichero.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRequirementRow>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| AuditError::Csv { path: path.to_path_buf(), source })?;

    let source = source_name(path);
    let majors = column_strings(&df, HEADER_MAJOR);
    let group_ids = column_strings(&df, HEADER_GROUP_ID);
    let courses = column_strings(&df, HEADER_COURSE);
    let tokens = column_strings(&df, HEADER_CREDITS_REQUIRED);

    let rows = majors
        .into_iter()
        .zip(group_ids)
        .zip(courses)
        .zip(tokens)
        .map(|(((major, group_id), course), requirement_token)| RawRequirementRow {
            source: source.clone(),
            major,
            group_id,
            course,
            requirement_token,
        })
        .collect();
    Ok(rows)
}

/// Lee la primera hoja de un libro Excel/ODS con los mismos encabezados que el CSV.
pub fn read_sheet_rows(path: &Path) -> Result<Vec<RawRequirementRow>> {
    let spreadsheet_err = |message: String| AuditError::Spreadsheet { path: path.to_path_buf(), message };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_err(e.to_string()))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let primera = match sheet_names.first() {
        Some(s) => s.clone(),
        None => return Err(spreadsheet_err("No se encontraron hojas en el archivo".to_string())),
    };
    let range = workbook.worksheet_range(&primera).map_err(|e| spreadsheet_err(e.to_string()))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(|c| normalize_header(&data_to_string(c))).collect(),
        None => return Ok(Vec::new()),
    };
    let idx = |header: &str| headers.iter().position(|h| *h == normalize_header(header));
    let idx_major = idx(HEADER_MAJOR);
    let idx_group = idx(HEADER_GROUP_ID);
    let idx_course = idx(HEADER_COURSE);
    let idx_token = idx(HEADER_CREDITS_REQUIRED);

    let source = source_name(path);
    let cell = |row: &[Data], i: Option<usize>| -> String {
        i.and_then(|i| row.get(i)).map(data_to_string).unwrap_or_default()
    };

    let rows = rows_iter
        .map(|row| RawRequirementRow {
            source: source.clone(),
            major: cell(row, idx_major),
            group_id: cell(row, idx_group),
            course: cell(row, idx_course),
            requirement_token: cell(row, idx_token),
        })
        .collect();
    Ok(rows)
}

/// Serializa el catálogo: JSON con sangría de 2 espacios y salto de línea final.
pub fn catalog_to_json(majors: &[Major]) -> Result<String> {
    let text = serde_json::to_string_pretty(majors)
        .map_err(|source| AuditError::Json { path: PathBuf::from("<catalog>"), source })?;
    Ok(text + "\n")
}

/// Escribe el catálogo normalizado, creando el directorio si hace falta.
pub fn write_catalog(path: &Path, majors: &[Major]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| AuditError::Io { path: dir.to_path_buf(), source })?;
        }
    }
    let text = catalog_to_json(majors)?;
    fs::write(path, text).map_err(|source| AuditError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(output = %path.display(), major_count = majors.len(), "normalized_majors_written");
    Ok(())
}

/// Lee un catálogo normalizado previamente escrito.
pub fn load_catalog(path: &Path) -> Result<Vec<Major>> {
    let text = fs::read_to_string(path).map_err(|source| AuditError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str::<Vec<Major>>(&text).map_err(|source| AuditError::Json { path: path.to_path_buf(), source })
}
