use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolves the request id (incoming header or a fresh v4 UUID), writes it
/// back onto the request so handlers see it, opens the request span and
/// echoes the id on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let header_value = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty())
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    let request_id = header_value
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if let Some(value) = &header_value {
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
