// --- Auditoría de requisitos por major - Archivo principal ---

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quickaudit=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = Cli::parse().run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
