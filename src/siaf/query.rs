use url::Url;

use crate::error::SiafError;

/// Endpoint de consulta de expedientes del SIAF
pub const SIAF_CONSULTA_URL: &str =
    "https://apps2.mef.gob.pe/consulta-vfp-webapp/actionConsultaExpediente.jspx";

/// Parámetros de una consulta de expediente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpedienteQuery {
    pub ano_eje: String,
    pub sec_ejec: String,
    pub expediente: String,
    pub captcha: Option<String>,
    pub base_url: String,
}

impl ExpedienteQuery {
    pub fn new(
        ano_eje: impl Into<String>,
        sec_ejec: impl Into<String>,
        expediente: impl Into<String>,
    ) -> Self {
        Self {
            ano_eje: ano_eje.into(),
            sec_ejec: sec_ejec.into(),
            expediente: expediente.into(),
            captcha: None,
            base_url: SIAF_CONSULTA_URL.to_string(),
        }
    }

    pub fn with_captcha(mut self, captcha: impl Into<String>) -> Self {
        self.captcha = Some(captcha.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL completa con los parámetros codificados
    pub fn to_url(&self) -> Result<Url, SiafError> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("anoEje", &self.ano_eje)
                .append_pair("secEjec", &self.sec_ejec)
                .append_pair("expediente", &self.expediente);
            if let Some(captcha) = self.captcha.as_deref().filter(|c| !c.is_empty()) {
                pairs.append_pair("j_captcha", captcha);
            }
        }
        Ok(url)
    }
}
