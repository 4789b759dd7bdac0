use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::SiafConfig;
use crate::siaf::{ExtractionResult, HttpFetcher, SiafExtractor};
use crate::traits::PageFetcher;

/// Solicitud de extracción
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub url: String,
    pub captcha_code: Option<String>,
    pub cookies: Option<HashMap<String, String>>,
}

impl ExtractRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            captcha_code: None,
            cookies: None,
        }
    }

    pub fn with_captcha(mut self, captcha_code: impl Into<String>) -> Self {
        self.captcha_code = Some(captcha_code.into());
        self
    }

    pub fn with_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = Some(cookies);
        self
    }
}

/// Servicio tower sobre `SiafExtractor`.
///
/// Los fallos viajan dentro de `ExtractionResult`, por eso el error del
/// servicio es `Infallible`.
pub struct SiafService<F = HttpFetcher> {
    extractor: Arc<SiafExtractor<F>>,
}

impl<F> Clone for SiafService<F> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
        }
    }
}

impl SiafService<HttpFetcher> {
    pub fn new(config: SiafConfig) -> Self {
        Self::from_extractor(SiafExtractor::new(config))
    }
}

impl Default for SiafService<HttpFetcher> {
    fn default() -> Self {
        Self::new(SiafConfig::default())
    }
}

impl<F> SiafService<F> {
    pub fn from_extractor(extractor: SiafExtractor<F>) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl<F> Service<ExtractRequest> for SiafService<F>
where
    F: PageFetcher + 'static,
{
    type Response = ExtractionResult;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ExtractRequest) -> Self::Future {
        info!("solicitud de extracción: url={}", req.url);
        let extractor = Arc::clone(&self.extractor);

        Box::pin(async move {
            let result = extractor
                .extract(&req.url, req.captcha_code.as_deref(), req.cookies.as_ref())
                .await;

            info!(
                "extracción terminada: success={}, filas={}",
                result.success,
                result.datos.len()
            );

            Ok(result)
        })
    }
}
