//! HTTP front end.
//!
//! | Route      | Response                                        |
//! |------------|-------------------------------------------------|
//! | `/`        | 200 `text/html`, the landing page               |
//! | `/status`  | 200 `application/json`, [`Status`] document     |
//! | `/control` | 200 `text/plain` `OK`, always                   |
//! | otherwise  | 404 `text/plain` `Not found`                    |
//!
//! Routing lives in the pure [`respond`] so it runs on the host.  The
//! ESP-IDF glue registers one wildcard GET handler that delegates to it.
//!
//! [`Status`]: crate::status::Status

use std::borrow::Cow;

use log::info;

use crate::adapters::log_sink::LogEventSink;
use crate::app::commands::ControlRequest;
use crate::app::shared::SharedController;
use crate::clock::Instant;

/// Landing page, served as-is.
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

const TEXT_PLAIN: &str = "text/plain";
const TEXT_HTML: &str = "text/html";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Cow<'static, str>,
}

impl HttpResponse {
    fn new(status: u16, content_type: &'static str, body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            _ => "",
        }
    }
}

/// Route one GET request.  `uri` is the raw request target, query included.
pub fn respond(uri: &str, ctrl: &SharedController, now: Instant) -> HttpResponse {
    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));

    match path {
        "/" => HttpResponse::new(200, TEXT_HTML, INDEX_HTML),
        "/status" => HttpResponse::new(200, APPLICATION_JSON, ctrl.status(now).to_json()),
        "/control" => {
            let req = ControlRequest::from_query(query);
            ctrl.handle_command(&req, now, &mut LogEventSink::new());
            HttpResponse::new(200, TEXT_PLAIN, "OK")
        }
        _ => {
            info!("Web: 404 Not Found - {uri}");
            HttpResponse::new(404, TEXT_PLAIN, "Not found")
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF server
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn start_server(
    ctrl: SharedController,
    port: u16,
) -> anyhow::Result<esp_idf_svc::http::server::EspHttpServer<'static>> {
    use esp_idf_svc::http::Method;
    use esp_idf_svc::http::server::{Configuration as HttpConfiguration, EspHttpServer};
    use esp_idf_svc::io::Write;

    use crate::adapters::time::Esp32TimeAdapter;
    use crate::clock::TimePort;

    let conf = HttpConfiguration {
        http_port: port,
        uri_match_wildcard: true,
        stack_size: 8 * 1024,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&conf)?;
    let clock = Esp32TimeAdapter::new();

    server.fn_handler::<anyhow::Error, _>("/*", Method::Get, move |req| {
        let uri = req.uri().to_owned();
        let resp = respond(&uri, &ctrl, clock.now());
        req.into_response(
            resp.status,
            Some(resp.reason()),
            &[("Content-Type", resp.content_type)],
        )?
        .write_all(resp.body.as_bytes())?;
        Ok(())
    })?;

    info!("HTTP server started on port {port}");
    Ok(server)
}
