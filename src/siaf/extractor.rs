//! Extractor SIAF: descarga → parseo → resumen → sobre de resultado

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::SiafConfig;
use crate::error::SiafError;
use crate::traits::PageFetcher;

use super::fetcher::HttpFetcher;
use super::parser;
use super::types::{Extraction, ExtractionResult, SummaryStrategy};

/// Extractor de la tabla `expedienteDetalles`
pub struct SiafExtractor<F = HttpFetcher> {
    fetcher: F,
    summary: SummaryStrategy,
}

impl SiafExtractor<HttpFetcher> {
    /// Extractor con descarga HTTP real
    pub fn new(config: SiafConfig) -> Self {
        let summary = config.summary;
        Self {
            fetcher: HttpFetcher::new(config),
            summary,
        }
    }
}

impl Default for SiafExtractor<HttpFetcher> {
    fn default() -> Self {
        Self::new(SiafConfig::default())
    }
}

impl<F: PageFetcher> SiafExtractor<F> {
    pub fn with_fetcher(fetcher: F, summary: SummaryStrategy) -> Self {
        Self { fetcher, summary }
    }

    /// Descarga y parsea, devolviendo el error tipado.
    pub async fn try_extract(&self, url: &str) -> Result<Extraction, SiafError> {
        let html = self.fetcher.fetch(url).await?;
        let extraction = parser::parse_page(&html, self.summary)?;
        info!(
            "extracción completa: filas={}, resumen={}",
            extraction.rows.len(),
            extraction.info.is_some()
        );
        Ok(extraction)
    }

    /// Ejecuta el pipeline completo y lo envuelve en `ExtractionResult`.
    ///
    /// `captcha_code` y `cookies` se aceptan pero no modifican la request.
    pub async fn extract(
        &self,
        url: &str,
        captcha_code: Option<&str>,
        cookies: Option<&HashMap<String, String>>,
    ) -> ExtractionResult {
        if captcha_code.is_some() || cookies.is_some() {
            debug!(
                "captcha={} cookies={}: no se usan en la request",
                captcha_code.is_some(),
                cookies.map(HashMap::len).unwrap_or(0)
            );
        }

        let outcome = self.try_extract(url).await;
        if let Err(e) = &outcome {
            warn!("extracción fallida: {}", e);
        }
        ExtractionResult::from(outcome)
    }
}
