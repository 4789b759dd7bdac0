use async_trait::async_trait;

use crate::error::SiafError;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Descarga la página y devuelve el cuerpo como texto.
    ///
    /// Cualquier fallo de red o status no exitoso debe reportarse como
    /// `SiafError::Transport`. Se intenta una sola vez.
    async fn fetch(&self, url: &str) -> Result<String, SiafError>;
}
