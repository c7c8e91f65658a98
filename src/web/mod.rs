//! Embedded web dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - the single-page dashboard for each of the five page routes
//! - JSON API endpoints for page view models, scores, and dataset status
//!
//! Launched via `nexusiq serve` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::view::route::Route;

/// Everything a request handler can read. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub datasets: Datasets,
    pub config: NexusConfig,
}

impl Dashboard {
    pub fn new(datasets: Datasets, config: NexusConfig) -> Self {
        Self { datasets, config }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on `addr`.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). A failing handler produces a 500 response
/// and the server keeps running.
pub fn serve(dashboard: &Dashboard, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let url = format!("http://{addr}");
    tracing::info!(%url, "dashboard listening");
    println!("Nexus IQ dashboard running at {url}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::debug!(error = %e, "could not open browser");
        }
    }

    for request in server.incoming_requests() {
        let started = Instant::now();
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = dispatch(dashboard, &method, &url).unwrap_or_else(|e| {
            tracing::error!(%method, %url, error = %format!("{e:#}"), "request failed");
            Reply::error(&e.to_string())
        });
        let status = reply.status;

        if let Err(e) = request.respond(reply.into_response()) {
            tracing::warn!(%url, error = %e, "failed to send response");
        }

        tracing::info!(
            %method,
            path = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
pub fn dispatch(dashboard: &Dashboard, method: &Method, url: &str) -> Result<Reply> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    match (method, path) {
        // API
        (&Method::Get, "/api/routes") => api::get_routes(),
        (&Method::Get, "/api/scores") => api::get_scores(dashboard),
        (&Method::Get, "/api/datasets") => api::get_datasets(dashboard),
        (&Method::Get, "/api/config") => api::get_config(dashboard),
        (&Method::Get, p) if p.starts_with("/api/pages/") => {
            api::get_page(dashboard, &p["/api/pages/".len()..], query)
        }

        // Frontend, one shell for every page route
        (&Method::Get, p) if Route::from_path(p).is_some() => Ok(Reply::html(frontend::INDEX_HTML)),

        // 404
        _ => Ok(Reply::not_found()),
    }
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A finished response body with its status and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    const JSON: &'static str = "application/json; charset=utf-8";
    const HTML: &'static str = "text/html; charset=utf-8";

    /// 200 with a JSON body.
    pub fn json<T: Serialize>(data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data).context("failed to serialize JSON response")?;
        Ok(Self {
            status: 200,
            content_type: Self::JSON,
            body,
        })
    }

    fn html(html: &str) -> Self {
        Self {
            status: 200,
            content_type: Self::HTML,
            body: html.as_bytes().to_vec(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: Self::JSON,
            body: br#"{"error": "not found"}"#.to_vec(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            status: 500,
            content_type: Self::JSON,
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        Response::from_data(self.body)
            .with_header(content_type(self.content_type))
            .with_status_code(StatusCode(self.status))
    }
}

fn content_type(value: &str) -> Header {
    Header::from_bytes("Content-Type", value).expect("static content-type header is valid")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> Reply {
        dispatch(&Dashboard::default(), &Method::Get, url).expect("dispatch")
    }

    fn json(reply: &Reply) -> serde_json::Value {
        serde_json::from_slice(&reply.body).expect("json body")
    }

    #[test]
    fn page_routes_serve_the_shell() {
        for path in ["/", "/query-rewriter", "/rewriter", "/adoption", "/feedback", "/content-health"] {
            let reply = get(path);
            assert_eq!(reply.status, 200, "{path}");
            assert_eq!(reply.content_type, Reply::HTML);
        }
    }

    #[test]
    fn unknown_paths_are_json_404() {
        let reply = get("/nope");
        assert_eq!(reply.status, 404);
        assert_eq!(json(&reply)["error"], "not found");

        let post = dispatch(&Dashboard::default(), &Method::Post, "/api/scores").expect("dispatch");
        assert_eq!(post.status, 404);
    }

    #[test]
    fn page_api_returns_view_model() {
        let reply = get("/api/pages/feedback?q=ups&type=thumbsDown");
        assert_eq!(reply.status, 200);
        let body = json(&reply);
        assert_eq!(body["route"], "feedback");
        assert_eq!(body["body"]["kind"], "feedback");
        assert_eq!(body["body"]["filters"]["polarity"], "thumbsDown");
    }

    #[test]
    fn page_api_unknown_route_is_404() {
        assert_eq!(get("/api/pages/settings").status, 404);
    }
}
