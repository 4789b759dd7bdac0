//! siaf-extract: imprime como JSON la tabla expedienteDetalles de una URL SIAF
//!
//! Uso:
//! ```text
//! siaf-extract "https://apps2.mef.gob.pe/consulta-vfp-webapp/actionConsultaExpediente.jspx?..."
//! ```
//!
//! Sin URL (o con opciones inválidas) imprime un JSON de uso y sale con
//! status 1. Con URL siempre sale con 0; el éxito o fallo va en el campo
//! `success`. Argumentos posicionales extra se ignoran.

use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use siaf_scraper::config::DEFAULT_TIMEOUT_SECS;
use siaf_scraper::{SiafConfig, SiafExtractor, SummaryStrategy};

const USAGE: &str = "Uso: siaf-extract <url>";

#[derive(Parser, Debug)]
#[command(name = "siaf-extract", version, about = "Extrae la tabla expedienteDetalles de SIAF a JSON")]
struct Cli {
    /// URL completa de la consulta SIAF
    url: Option<String>,

    /// Código CAPTCHA (se acepta, no se envía)
    #[arg(long)]
    captcha: Option<String>,

    /// Fila usada para `info_siaf`: first | latest
    #[arg(long, default_value_t = SummaryStrategy::FirstRow)]
    summary: SummaryStrategy,

    /// Timeout de la request en segundos
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Argumentos posicionales extra: se ignoran
    #[arg(hide = true)]
    rest: Vec<String>,
}

fn print_usage() -> ExitCode {
    println!("{}", serde_json::json!({ "success": false, "error": USAGE }));
    ExitCode::from(1)
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout queda reservado para el JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Cualquier error de argumentos sale como JSON de uso, nunca como error de clap
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            debug!("argumentos inválidos: {}", e);
            return print_usage();
        }
    };

    let Some(url) = cli.url else {
        return print_usage();
    };
    if !cli.rest.is_empty() {
        debug!("argumentos extra ignorados: {:?}", cli.rest);
    }

    let config = SiafConfig::new()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_summary(cli.summary);

    let result = SiafExtractor::new(config)
        .extract(&url, cli.captcha.as_deref(), None)
        .await;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("no se pudo serializar el resultado: {}", e),
    }

    ExitCode::SUCCESS
}
