//! HTTP transport
//!
//! Accepts the contest server's requests and hands them to the [`Router`].
//! Responsibilities:
//! - answer anything that is not a `POST` with a small informational page
//! - treat a `POST` without `Content-Length` as the server's keep-alive check
//! - refuse to buffer bodies declared larger than the configured cap
//! - extract the `type` and `body` parameters (see [`EnvelopeParams`])
//! - run the router on the blocking pool, since engine calls may block
//!
//! Every response is `200 OK` with `text/html; charset=utf-8`. The contest
//! server reads any other status as a protocol violation, so failures only
//! show up in the log and as an empty body.

use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};

use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tracing::{Instrument, Span, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::params::EnvelopeParams;
use crate::router::Router;
use crate::utils::error::ServerError;

/// Body served to non-`POST` requests.
pub const INFO_PAGE: &str =
    "Visit <h3><a href=\"http://www.recommenders.net\">recommenders.net</a></h3>";

const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Binds `addr` and serves contest requests until the server fails.
pub async fn start_http_server(
    addr: &str,
    router: Router,
    max_body_bytes: u64,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)?;
    serve(listener, router, max_body_bytes).await
}

/// Serves contest requests on an already bound listener.
///
/// Requests whose `Content-Length` exceeds `max_body_bytes` are answered
/// with an empty body without being read.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    max_body_bytes: u64,
) -> Result<(), ServerError> {
    listener.set_nonblocking(true)?;
    let local_addr = listener.local_addr()?;

    let make_svc = make_service_fn(move |conn: &AddrStream| {
        let router = router.clone();
        let remote_addr = conn.remote_addr();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                handle_request(req, router.clone(), remote_addr, max_body_bytes)
            }))
        }
    });

    let server = Server::from_tcp(listener)?.serve(make_svc);
    info!("Contest handler listening on http://{}", local_addr);

    server.await?;
    Ok(())
}

/// Handles one HTTP request. Never fails and always answers `200 OK`.
pub async fn handle_request(
    req: Request<Body>,
    router: Router,
    remote_addr: SocketAddr,
    max_body_bytes: u64,
) -> Result<Response<Body>, Infallible> {
    let span = info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        remote = %remote_addr,
    );
    Ok(dispatch(req, router, max_body_bytes).instrument(span).await)
}

async fn dispatch(req: Request<Body>, router: Router, max_body_bytes: u64) -> Response<Body> {
    if req.method() != Method::POST {
        debug!("non-POST request answered with info page");
        return html_response(Some(INFO_PAGE.to_string()));
    }

    let Some(declared) = req.headers().get(CONTENT_LENGTH) else {
        info!("Initial message with no content received");
        return html_response(None);
    };
    match declared.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(len) if len <= max_body_bytes => {}
        Some(len) => {
            warn!(content_length = len, max_body_bytes, "request body too large, not read");
            return html_response(None);
        }
        None => {
            warn!(content_length = ?declared, "unparseable Content-Length, body not read");
            return html_response(None);
        }
    }

    let (parts, body) = req.into_parts();
    let payload = match hyper::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return html_response(None);
        }
    };
    let params = EnvelopeParams::from_request(&parts, &payload);

    let span = Span::current();
    let handled = tokio::task::spawn_blocking(move || {
        span.in_scope(|| router.handle(&params.message_type, params.body.as_deref()))
    })
    .await;

    match handled {
        Ok(text) => {
            if let Some(text) = text.as_deref().filter(|t| !t.starts_with("handle")) {
                debug!(response = text, "sending response");
            }
            html_response(text)
        }
        Err(e) => {
            error!(error = %e, "message handler did not complete");
            html_response(None)
        }
    }
}

fn html_response(body: Option<String>) -> Response<Body> {
    let mut response = Response::new(body.map(Body::from).unwrap_or_else(Body::empty));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_HTML));
    response
}
