//! Extracción de expedientes SIAF
//!
//! Descarga la página de consulta, lee la tabla `expedienteDetalles` y
//! arma el sobre de resultado JSON.

mod charset;
mod extractor;
mod fetcher;
pub mod parser;
mod query;
mod types;

pub use extractor::SiafExtractor;
pub use fetcher::HttpFetcher;
pub use query::{ExpedienteQuery, SIAF_CONSULTA_URL};
pub use types::{Extraction, ExtractionResult, InfoSiaf, SiafRow, SummaryStrategy};
