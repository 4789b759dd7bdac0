//! Extractor de expedientes SIAF
//!
//! - Descarga la página de consulta de SIAF (un solo GET)
//! - Lee la tabla `expedienteDetalles` y la convierte en filas
//! - Devuelve un sobre de resultado serializable a JSON
//!
//! # Uso
//!
//! ```rust,ignore
//! use siaf_scraper::{SiafConfig, SiafExtractor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let extractor = SiafExtractor::new(SiafConfig::default());
//!     let result = extractor.extract("https://apps2.mef.gob.pe/...", None, None).await;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! }
//! ```
//!
//! # Como servicio tower
//!
//! ```rust,ignore
//! use siaf_scraper::{ExtractRequest, SiafService};
//! use tower::ServiceExt;
//!
//! let result = SiafService::default()
//!     .oneshot(ExtractRequest::new(url))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod siaf;
pub mod traits;

// Tipos principales
pub use config::SiafConfig;
pub use error::SiafError;
pub use service::{ExtractRequest, SiafService};
pub use siaf::{
    ExpedienteQuery, Extraction, ExtractionResult, HttpFetcher, InfoSiaf, SiafExtractor, SiafRow,
    SummaryStrategy,
};
pub use traits::PageFetcher;
