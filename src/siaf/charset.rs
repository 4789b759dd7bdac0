//! Decodificación del cuerpo HTML según su charset declarado

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Bytes iniciales donde se busca `<meta charset>`
const META_SNIFF_LEN: usize = 1024;

/// Decodifica el cuerpo: charset de `Content-Type`, luego `<meta>`, luego UTF-8.
/// Un BOM presente tiene prioridad sobre ambos.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    debug!("cuerpo decodificado como {} (errores={})", used.name(), had_errors);
    text.into_owned()
}

/// Valor de `charset=` dentro de un texto (`Content-Type` o atributo meta).
fn charset_label(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("charset")? + "charset".len();
    let rest = text[start..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let rest = rest.trim_start_matches(['"', '\'']);
    let end = rest
        .find(|c: char| matches!(c, '"' | '\'' | ';' | '>' | '/') || c.is_whitespace())
        .unwrap_or(rest.len());
    let label = &rest[..end];
    (!label.is_empty()).then_some(label)
}

/// Busca un charset declarado en `<meta charset>` o `http-equiv` al inicio del documento.
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    // Las etiquetas de charset son ASCII; el resto del prefijo puede no serlo
    let head = String::from_utf8_lossy(head);
    let lower = head.to_ascii_lowercase();

    let mut from = 0;
    while let Some(pos) = lower[from..].find("<meta") {
        let tag_start = from + pos;
        let tag_end = lower[tag_start..]
            .find('>')
            .map(|end| tag_start + end)
            .unwrap_or(lower.len());
        if let Some(encoding) = charset_label(&head[tag_start..tag_end])
            .and_then(|label| Encoding::for_label(label.as_bytes()))
        {
            return Some(encoding);
        }
        from = tag_end;
    }
    None
}
