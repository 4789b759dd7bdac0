//! Tipos del extractor SIAF

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SiafError;

/// Formato del timestamp del resultado (hora local, sin zona, microsegundos)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Una fila de `expedienteDetalles` (celdas 0..12, texto recortado)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiafRow {
    pub ciclo: String,
    pub fase: String,
    pub secuencia: String,
    pub correlativo: String,
    pub cod_doc: String,
    pub num_doc: String,
    pub fecha: String,
    pub ff: String,
    pub moneda: String,
    pub monto: String,
    pub estado: String,
    pub fecha_hora: String,
}

/// Resumen derivado de una fila (`info_siaf`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfoSiaf {
    pub fase: String,
    pub estado: String,
    pub fecha_proceso: String,
}

/// Cómo se arma `info_siaf` a partir de las filas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryStrategy {
    /// Primera fila tal cual
    #[default]
    FirstRow,
    /// Última fila, con campos vacíos completados desde filas anteriores
    Latest,
}

impl FromStr for SummaryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Self::FirstRow),
            "latest" => Ok(Self::Latest),
            other => Err(format!("estrategia desconocida: {other} (first|latest)")),
        }
    }
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstRow => f.write_str("first"),
            Self::Latest => f.write_str("latest"),
        }
    }
}

/// Filas extraídas de una página y su resumen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub rows: Vec<SiafRow>,
    pub info: Option<InfoSiaf>,
}

/// Sobre de resultado: el único documento JSON que se emite
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractionResult {
    pub success: bool,
    pub error: Option<String>,
    pub datos: Vec<SiafRow>,
    #[serde(serialize_with = "info_or_empty")]
    pub info_siaf: Option<InfoSiaf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ExtractionResult {
    pub fn succeeded(extraction: Extraction) -> Self {
        Self::succeeded_at(extraction, Local::now().naive_local())
    }

    pub fn succeeded_at(extraction: Extraction, at: NaiveDateTime) -> Self {
        Self {
            success: true,
            error: None,
            datos: extraction.rows,
            info_siaf: extraction.info,
            timestamp: Some(at.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    pub fn failure(error: &SiafError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            datos: Vec::new(),
            info_siaf: None,
            timestamp: None,
        }
    }
}

impl From<Result<Extraction, SiafError>> for ExtractionResult {
    fn from(outcome: Result<Extraction, SiafError>) -> Self {
        match outcome {
            Ok(extraction) => Self::succeeded(extraction),
            Err(error) => Self::failure(&error),
        }
    }
}

/// Sin resumen se serializa `{}` en lugar de `null`
fn info_or_empty<S>(info: &Option<InfoSiaf>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match info {
        Some(info) => info.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
