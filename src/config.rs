use std::time::Duration;

use crate::siaf::SummaryStrategy;

/// User-Agent fijo de navegador enviado a SIAF
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SiafConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// SIAF se consulta sin verificar el certificado TLS
    pub accept_invalid_certs: bool,
    pub summary: SummaryStrategy,
}

impl Default for SiafConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: true,
            summary: SummaryStrategy::FirstRow,
        }
    }
}

impl SiafConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_summary(mut self, summary: SummaryStrategy) -> Self {
        self.summary = summary;
        self
    }
}
