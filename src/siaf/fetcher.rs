use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::SiafConfig;
use crate::error::SiafError;
use crate::traits::PageFetcher;

use super::charset::decode_body;

/// Descarga por HTTP GET con `reqwest`.
///
/// Cada `fetch` arma su propio cliente (y su cookie store), así que no
/// queda estado compartido entre invocaciones.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    config: SiafConfig,
}

impl HttpFetcher {
    pub fn new(config: SiafConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<Client, SiafError> {
        Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .timeout(self.config.timeout)
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .cookie_store(true)
            .build()
            .map_err(SiafError::from)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SiafError> {
        let url = Url::parse(url)?;
        info!("GET {}", url);

        let response = self.client()?.get(url).send().await?;
        let status = response.status();
        debug!("status: {}", status);

        let response = response.error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?;
        debug!("cuerpo recibido: {} bytes", bytes.len());

        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}
