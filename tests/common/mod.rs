#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CONSULTA_PATH: &str = "/consulta-vfp-webapp/actionConsultaExpediente.jspx";

pub const SAMPLE_CELLS: [&str; 12] = [
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

pub fn tr(cells: &[&str]) -> String {
    let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
    format!("<tr>{}</tr>", tds)
}

/// Página SIAF con las filas dadas dentro de `expedienteDetalles`
pub fn siaf_page(rows: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Consulta de Expediente</title></head>
<body>
  <h3>Detalle del expediente</h3>
  <table id="expedienteDetalles" class="tabla">
    <thead>
      <tr><th>Ciclo</th><th>Fase</th><th>Sec.</th><th>Corr.</th><th>Cod.Doc</th><th>Num.Doc</th>
          <th>Fecha</th><th>FF</th><th>Moneda</th><th>Monto</th><th>Estado</th><th>Fecha/Hora</th></tr>
    </thead>
    <tbody>
      {}
    </tbody>
  </table>
</body></html>"#,
        rows.concat()
    )
}

/// Levanta un servidor local que responde `body` con `status` en la ruta de consulta
pub async fn serve(status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSULTA_PATH))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.into_bytes(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

pub fn consulta_url(server: &MockServer) -> String {
    format!("{}{}?anoEje=2024&secEjec=1&expediente=2", server.uri(), CONSULTA_PATH)
}
