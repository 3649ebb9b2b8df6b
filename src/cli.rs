use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use quickaudit::algorithm::{evaluate_major_progress, list_majors, rank_majors, DEFAULT_TOP_N};
use quickaudit::api_json::{parse_transcript_rows, DEFAULT_DEGREE_TYPE};
use quickaudit::catalog::{load_catalog, normalize_dir};
use quickaudit::config::AuditConfig;
use quickaudit::diagnostics::{log_all, Severity};

/// Normaliza requisitos por major y calcula el avance de un estudiante
#[derive(Parser, Debug)]
#[command(name = "quickaudit", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normaliza las hojas de requisitos y escribe el catálogo JSON
    Normalize(NormalizeArgs),
    /// Calcula el avance del estudiante en un major
    Progress(ProgressArgs),
    /// Lista los majors del catálogo
    Majors(CatalogArgs),
    /// Ordena los majors por avance del estudiante
    Rank(RankArgs),
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Directorio con los CSV/Excel de requisitos
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Ruta del catálogo a escribir
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catálogo normalizado a usar
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ProgressArgs {
    #[arg(long)]
    pub major: String,

    #[arg(long, default_value = DEFAULT_DEGREE_TYPE)]
    pub degree_type: String,

    /// JSON con el arreglo de filas del expediente
    #[arg(long)]
    pub student_courses: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Escribir el resultado aquí en vez de stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    #[arg(long, default_value = DEFAULT_DEGREE_TYPE)]
    pub degree_type: String,

    #[arg(long)]
    pub student_courses: PathBuf,

    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let config = AuditConfig::from_env();
        match self.command {
            Commands::Normalize(args) => run_normalize(&config, args),
            Commands::Progress(args) => run_progress(&config, args),
            Commands::Majors(args) => {
                let catalog = load_catalog(&catalog_path(&config, &args))?;
                for name in list_majors(&catalog) {
                    println!("{}", name);
                }
                Ok(())
            }
            Commands::Rank(args) => {
                let catalog = load_catalog(&catalog_path(&config, &args.catalog))?;
                let rows = parse_transcript_rows(&read_text(&args.student_courses)?)?;
                let ranking = rank_majors(&catalog, &args.degree_type, &rows, args.top);
                println!("{}", serde_json::to_string_pretty(&ranking)?);
                Ok(())
            }
        }
    }
}

fn catalog_path(config: &AuditConfig, args: &CatalogArgs) -> PathBuf {
    args.catalog.clone().unwrap_or_else(|| config.catalog_path.clone())
}

fn read_text(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e).into())
}

fn run_normalize(config: &AuditConfig, args: NormalizeArgs) -> Result<(), Box<dyn Error>> {
    let source_dir = args.source_dir.unwrap_or_else(|| config.source_dir.clone());
    let output = args.output.unwrap_or_else(|| config.catalog_path.clone());

    let normalization = normalize_dir(&source_dir, &output)?;
    log_all(&normalization.diagnostics);

    let warnings = normalization.diagnostics.iter().filter(|d| d.severity() == Severity::Warn).count();
    println!(
        "{} majors escritos en {} ({} diagnósticos, {} avisos)",
        normalization.majors.len(),
        output.display(),
        normalization.diagnostics.len(),
        warnings
    );
    Ok(())
}

fn run_progress(config: &AuditConfig, args: ProgressArgs) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(&catalog_path(config, &args.catalog))?;
    let rows = parse_transcript_rows(&read_text(&args.student_courses)?)?;

    let result = evaluate_major_progress(&catalog, &args.major, &args.degree_type, &rows)?;
    let text = serde_json::to_string_pretty(&result)? + "\n";

    match args.output {
        Some(path) => fs::write(&path, text).map_err(|e| format!("failed to write {}: {}", path.display(), e))?,
        None => print!("{}", text),
    }
    Ok(())
}
