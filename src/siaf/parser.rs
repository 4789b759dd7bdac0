//! Parseo de la página SIAF: tabla `expedienteDetalles` → filas y resumen

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::SiafError;

use super::types::{Extraction, InfoSiaf, SiafRow, SummaryStrategy};

/// Selector de la tabla de detalle del expediente
pub const TABLE_SELECTOR: &str = "table[id=\"expedienteDetalles\"]";
/// Columnas por fila; filas más cortas se descartan
pub const ROW_CELLS: usize = 12;

fn selector(css: &str) -> Result<Selector, SiafError> {
    Selector::parse(css).map_err(|e| SiafError::Extraction(format!("selector '{}': {}", css, e)))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parsea el HTML completo y arma filas + resumen.
pub fn parse_page(html: &str, strategy: SummaryStrategy) -> Result<Extraction, SiafError> {
    let document = Html::parse_document(html);
    let rows = extract_rows(&document)?;
    let info = summarize(&rows, strategy);
    Ok(Extraction { rows, info })
}

/// Extrae las filas del `tbody` de la tabla, en orden de documento.
///
/// Sin tabla devuelve `SiafError::MissingTable`; sin `tbody` devuelve
/// una lista vacía.
pub fn extract_rows(document: &Html) -> Result<Vec<SiafRow>, SiafError> {
    let table_sel = selector(TABLE_SELECTOR)?;
    let tbody_sel = selector("tbody")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(SiafError::MissingTable)?;

    let Some(tbody) = table.select(&tbody_sel).next() else {
        debug!("expedienteDetalles sin tbody");
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for tr in tbody.select(&tr_sel) {
        let cells: Vec<String> = tr.select(&td_sel).map(cell_text).collect();
        match row_from_cells(&cells) {
            Some(row) => rows.push(row),
            None => debug!("fila descartada: {} celdas", cells.len()),
        }
    }

    debug!("filas extraídas: {}", rows.len());
    Ok(rows)
}

/// Construye una fila a partir de las celdas posicionales.
/// Devuelve `None` si hay menos de 12 celdas; las celdas extra se ignoran.
pub fn row_from_cells<S: AsRef<str>>(cells: &[S]) -> Option<SiafRow> {
    if cells.len() < ROW_CELLS {
        return None;
    }
    let cell = |i: usize| cells[i].as_ref().trim().to_string();

    Some(SiafRow {
        ciclo: cell(0),
        fase: cell(1),
        secuencia: cell(2),
        correlativo: cell(3),
        cod_doc: cell(4),
        num_doc: cell(5),
        fecha: cell(6),
        ff: cell(7),
        moneda: cell(8),
        monto: cell(9),
        estado: cell(10),
        fecha_hora: cell(11),
    })
}

/// Arma `info_siaf`; `None` si no hay filas.
pub fn summarize(rows: &[SiafRow], strategy: SummaryStrategy) -> Option<InfoSiaf> {
    match strategy {
        SummaryStrategy::FirstRow => rows.first().map(|row| InfoSiaf {
            fase: row.fase.clone(),
            estado: row.estado.clone(),
            fecha_proceso: date_part(&row.fecha_hora).to_string(),
        }),
        SummaryStrategy::Latest => merge_latest(rows).map(|row| InfoSiaf {
            fase: row.fase,
            estado: row.estado,
            fecha_proceso: normalize_date(date_part(&row.fecha_hora)).unwrap_or_default(),
        }),
    }
}

/// Parte de fecha de `fechaHora`: todo lo anterior al primer espacio.
pub fn date_part(fecha_hora: &str) -> &str {
    fecha_hora.split_whitespace().next().unwrap_or_default()
}

/// `dd/mm/yyyy` → `yyyy-mm-dd`; `yyyy-mm-dd` se conserva; otro formato → `None`.
pub fn normalize_date(date: &str) -> Option<String> {
    if date.len() != 10 {
        return None;
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%d/%m/%Y") {
        return Some(parsed.format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|_| date.to_string())
}

fn field(row: &SiafRow, index: usize) -> &String {
    match index {
        0 => &row.ciclo,
        1 => &row.fase,
        2 => &row.secuencia,
        3 => &row.correlativo,
        4 => &row.cod_doc,
        5 => &row.num_doc,
        6 => &row.fecha,
        7 => &row.ff,
        8 => &row.moneda,
        9 => &row.monto,
        10 => &row.estado,
        _ => &row.fecha_hora,
    }
}

fn field_mut(row: &mut SiafRow, index: usize) -> &mut String {
    match index {
        0 => &mut row.ciclo,
        1 => &mut row.fase,
        2 => &mut row.secuencia,
        3 => &mut row.correlativo,
        4 => &mut row.cod_doc,
        5 => &mut row.num_doc,
        6 => &mut row.fecha,
        7 => &mut row.ff,
        8 => &mut row.moneda,
        9 => &mut row.monto,
        10 => &mut row.estado,
        _ => &mut row.fecha_hora,
    }
}

/// Última fila con los campos vacíos completados desde filas anteriores.
///
/// Primero se busca hacia atrás una fila del mismo ciclo y fase; si no la
/// hay, la fila anterior más cercana con valor.
fn merge_latest(rows: &[SiafRow]) -> Option<SiafRow> {
    let (last, earlier) = rows.split_last()?;
    let mut merged = last.clone();

    for index in 0..ROW_CELLS {
        if !field(&merged, index).is_empty() {
            continue;
        }

        let same_stage = earlier.iter().rev().find(|row| {
            !field(row, index).is_empty() && row.ciclo == merged.ciclo && row.fase == merged.fase
        });
        let source = same_stage.or_else(|| earlier.iter().rev().find(|row| !field(row, index).is_empty()));

        if let Some(source) = source {
            *field_mut(&mut merged, index) = field(source, index).clone();
        }
    }

    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CELLS: [&str; 12] = [
        "2024",
        "D",
        "1",
        "10",
        "01",
        "5",
        "2024-01-05",
        "1",
        "SOL",
        "1000.00",
        "PAGADO",
        "2024-01-05 10:00:00",
    ];

    fn tr(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    fn page(body_rows: &[String]) -> String {
        format!(
            r#"<html><body>
            <table id="otra"><tbody>{}</tbody></table>
            <table id="expedienteDetalles">
              <thead><tr><th>Ciclo</th><th>Fase</th></tr></thead>
              <tbody>{}</tbody>
            </table>
            </body></html>"#,
            tr(&SAMPLE_CELLS),
            body_rows.concat()
        )
    }

    fn row_with(ciclo: &str, fase: &str, estado: &str, fecha_hora: &str) -> SiafRow {
        SiafRow {
            ciclo: ciclo.into(),
            fase: fase.into(),
            estado: estado.into(),
            fecha_hora: fecha_hora.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_row_mapping() {
        let row = row_from_cells(&SAMPLE_CELLS).unwrap();
        assert_eq!(
            row,
            SiafRow {
                ciclo: "2024".into(),
                fase: "D".into(),
                secuencia: "1".into(),
                correlativo: "10".into(),
                cod_doc: "01".into(),
                num_doc: "5".into(),
                fecha: "2024-01-05".into(),
                ff: "1".into(),
                moneda: "SOL".into(),
                monto: "1000.00".into(),
                estado: "PAGADO".into(),
                fecha_hora: "2024-01-05 10:00:00".into(),
            }
        );
    }

    #[test]
    fn test_short_row_is_skipped() {
        assert!(row_from_cells(&SAMPLE_CELLS[..11]).is_none());
        assert!(row_from_cells::<&str>(&[]).is_none());
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let mut cells = SAMPLE_CELLS.to_vec();
        cells.push("TRX-99");
        let row = row_from_cells(&cells).unwrap();
        assert_eq!(row.fecha_hora, "2024-01-05 10:00:00");
    }

    #[test]
    fn test_parse_page_counts_qualifying_rows_in_order() {
        let mut second = SAMPLE_CELLS;
        second[2] = "2";
        let html = page(&[
            tr(&SAMPLE_CELLS),
            tr(&["solo", "tres", "celdas"]),
            tr(&second),
        ]);

        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.rows[0].secuencia, "1");
        assert_eq!(extraction.rows[1].secuencia, "2");
    }

    #[test]
    fn test_parse_page_summary_from_first_row() {
        let html = page(&[tr(&SAMPLE_CELLS)]);
        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(
            extraction.info,
            Some(InfoSiaf {
                fase: "D".into(),
                estado: "PAGADO".into(),
                fecha_proceso: "2024-01-05".into(),
            })
        );
    }

    #[test]
    fn test_cells_are_trimmed_and_nested_markup_flattened() {
        let mut cells = SAMPLE_CELLS.map(String::from);
        cells[5] = "  5  ".into();
        cells[10] = "\n  <span><b>PAGADO</b></span>\t".into();
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let html = page(&[tr(&refs)]);

        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(extraction.rows[0].num_doc, "5");
        assert_eq!(extraction.rows[0].estado, "PAGADO");
    }

    #[test]
    fn test_entities_are_decoded() {
        let mut cells = SAMPLE_CELLS;
        cells[8] = "S&amp;/.";
        let html = page(&[tr(&cells)]);
        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(extraction.rows[0].moneda, "S&/.");
    }

    #[test]
    fn test_missing_table() {
        let html = "<html><body><table id=\"otra\"><tr><td>x</td></tr></table></body></html>";
        let err = parse_page(html, SummaryStrategy::FirstRow).unwrap_err();
        assert!(matches!(err, SiafError::MissingTable));
    }

    #[test]
    fn test_table_without_qualifying_rows() {
        let html = page(&[tr(&["a", "b"])]);
        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert!(extraction.rows.is_empty());
        assert!(extraction.info.is_none());
    }

    #[test]
    fn test_rows_directly_under_table_get_implicit_tbody() {
        // html5ever inserta el tbody que falta, así que la fila cuenta
        let html = format!(
            "<html><body><table id=\"expedienteDetalles\">{}</table></body></html>",
            tr(&SAMPLE_CELLS)
        );
        let extraction = parse_page(&html, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].estado, "PAGADO");
    }

    #[test]
    fn test_latest_summary_keeps_zero_values() {
        let rows = vec![
            row_with("2024", "D", "PAGADO", "2024-01-02 08:00:00"),
            row_with("2024", "D", "0", "2024-01-05 10:00:00"),
        ];
        let info = summarize(&rows, SummaryStrategy::Latest).unwrap();
        assert_eq!(info.estado, "0");
    }

    #[test]
    fn test_normalize_date_rejects_impossible_dates() {
        assert_eq!(normalize_date("31/02/2024"), None);
        assert_eq!(normalize_date("2024-02-30"), None);
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2024-01-05 10:00:00"), "2024-01-05");
        assert_eq!(date_part("05/01/2024"), "05/01/2024");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn test_first_row_summary_with_empty_fecha_hora() {
        let rows = vec![row_with("2024", "C", "A", "")];
        let info = summarize(&rows, SummaryStrategy::FirstRow).unwrap();
        assert_eq!(info.fecha_proceso, "");
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("05/01/2024").as_deref(), Some("2024-01-05"));
        assert_eq!(normalize_date("2024-01-05").as_deref(), Some("2024-01-05"));
        assert_eq!(normalize_date("5/1/2024"), None);
        assert_eq!(normalize_date("ayer"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_latest_summary_fills_from_same_stage_first() {
        let rows = vec![
            row_with("2024", "D", "OTRO", "01/01/2024 08:00:00"),
            row_with("2024", "G", "APROBADO", "03/01/2024 09:00:00"),
            row_with("2024", "D", "", "05/01/2024 10:00:00"),
        ];
        let info = summarize(&rows, SummaryStrategy::Latest).unwrap();
        assert_eq!(info.fase, "D");
        assert_eq!(info.estado, "OTRO");
        assert_eq!(info.fecha_proceso, "2024-01-05");
    }

    #[test]
    fn test_latest_summary_falls_back_to_any_earlier_row() {
        let rows = vec![
            row_with("2024", "C", "APROBADO", "2024-01-02 08:00:00"),
            row_with("2024", "P", "", ""),
        ];
        let info = summarize(&rows, SummaryStrategy::Latest).unwrap();
        assert_eq!(info.fase, "P");
        assert_eq!(info.estado, "APROBADO");
        assert_eq!(info.fecha_proceso, "2024-01-02");
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[], SummaryStrategy::FirstRow).is_none());
        assert!(summarize(&[], SummaryStrategy::Latest).is_none());
    }
}
