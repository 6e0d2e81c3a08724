//! HTTP server for interactive mode
//!
//! `rosterview serve` → prepares the data, starts a server, opens the browser.
//!
//! The page is the same one `generate` writes, except that search and hover
//! events are sent to the server. The server owns the single
//! [`ViewController`] and answers every event with the resulting view state:
//!
//! ```text
//! GET /                  interactive page (resets the view state)
//! GET /api/state         current view state
//! GET /api/search?q=ID   search box changed
//! GET /api/hover?index=N pointer entered scatter point N
//! GET /api/summary       dataset summary
//! ```
//!
//! Requests are handled one at a time, in arrival order.

use crate::data::PreparedData;
use crate::report::{html, Summary};
use crate::view::chart::ChartModel;
use crate::view::ViewController;
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(error: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(error.into()) }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct HoverParams {
    pub index: Option<usize>,
}

/// A response ready to hand to the HTTP layer
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| format!(r#"{{"ok":false,"data":null,"error":"{}"}}"#, e));
        Self { status, content_type: "application/json", body }
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: "Not found".to_string() }
    }
}

/// Start server, open browser, serve the chart
pub fn start(port: u16, data: &PreparedData, open_browser: bool) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://localhost:{}", port);
    eprintln!("\n\x1b[1;32mrosterview\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Serving {} rosters\n", data.len());

    let page = render_page(data)?;
    let mut controller = ViewController::new(data);

    if open_browser {
        if let Err(e) = open::that(&url) {
            log::warn!("failed to open browser: {}", e);
        }
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &mut controller, &page) {
            log::error!("request failed: {}", e);
        }
    }

    Ok(())
}

fn render_page(data: &PreparedData) -> std::io::Result<String> {
    let chart = ChartModel::new(data).with_remote(true);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let mut out = Vec::new();
    html::write_page(&mut out, &chart, &generated)?;
    String::from_utf8(out).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

fn handle_request(request: Request, controller: &mut ViewController, page: &str) -> std::io::Result<()> {
    let url = request.url().to_string();
    let method = request.method().clone();
    log::debug!("{} {}", method, url);

    let reply = dispatch(controller, page, &method, &url);

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    request.respond(response)
}

/// Route one request to the view controller
pub fn dispatch(controller: &mut ViewController, page: &str, method: &Method, url: &str) -> Reply {
    let mut parts = url.splitn(2, '?');
    let path = parts.next().unwrap_or("/");
    let query = parts.next().unwrap_or("");

    if *method != Method::Get {
        return Reply::not_found();
    }

    match path {
        // A freshly loaded page starts from the initial state, so the
        // controller has to as well
        "/" => {
            controller.reset();
            Reply::html(page.to_string())
        }

        "/api/state" => Reply::json(200, &ApiResponse::success(controller.state())),

        "/api/search" => match serde_urlencoded::from_str::<SearchParams>(query) {
            Ok(params) => {
                controller.search(&params.q);
                Reply::json(200, &ApiResponse::success(controller.state()))
            }
            Err(e) => Reply::json(400, &ApiResponse::failure(e.to_string())),
        },

        "/api/hover" => match serde_urlencoded::from_str::<HoverParams>(query) {
            Ok(params) => {
                controller.hover(params.index);
                Reply::json(200, &ApiResponse::success(controller.state()))
            }
            Err(e) => Reply::json(400, &ApiResponse::failure(e.to_string())),
        },

        "/api/summary" => Reply::json(200, &ApiResponse::success(Summary::from_data(controller.data()))),

        _ => Reply::not_found(),
    }
}
