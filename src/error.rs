use std::error::Error as _;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiafError {
    /// Conexión, timeout, status no exitoso o lectura del cuerpo
    #[error("Error en request a SIAF: {0}")]
    Transport(String),

    /// La página llegó pero no contiene `table#expedienteDetalles`
    #[error("No se encontró la tabla expedienteDetalles")]
    MissingTable,

    #[error("Error extrayendo datos: {0}")]
    Extraction(String),
}

impl From<reqwest::Error> for SiafError {
    fn from(error: reqwest::Error) -> Self {
        // reqwest deja la causa real (DNS, rechazo, TLS) en la cadena de source
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }
}

impl From<url::ParseError> for SiafError {
    fn from(error: url::ParseError) -> Self {
        Self::Transport(error.to_string())
    }
}
