//! HTTP Middleware
//!
//! 请求日志中间件：记录调用方标识与请求耗时

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

use super::handlers::USER_ID_HEADER;

/// 请求日志中间件
///
/// 每个请求记录方法、路径、上游网关注入的 user_id 和耗时；
/// 4xx/5xx 按级别升级。业务错误（errno != 0）在
/// ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    // 公开路由（/files、/api/shared）没有该头，记为 "-"
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            user_id = %user_id,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            user_id = %user_id,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            user_id = %user_id,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn generate_stub() -> &'static str {
        "generated"
    }

    async fn missing_voice_stub() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn broken_synth_stub() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn test_router() -> Router {
        Router::new()
            .route("/tts/generate", get(generate_stub))
            .route("/voices/unknown", get(missing_voice_stub))
            .route("/tts/broken", get(broken_synth_stub))
            .layer(axum::middleware::from_fn(request_logging_middleware))
    }

    #[tokio::test]
    async fn test_response_passes_through_unchanged() {
        let request = HttpRequest::builder()
            .uri("/tts/generate")
            .header(USER_ID_HEADER, "u-1")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_anonymous_request_is_not_blocked() {
        // 公开路由没有 user_id 头，中间件只记录不拦截
        let request = HttpRequest::builder()
            .uri("/tts/generate")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_error_status_is_preserved() {
        let request = HttpRequest::builder()
            .uri("/voices/unknown")
            .header(USER_ID_HEADER, "u-1")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_status_is_preserved() {
        let request = HttpRequest::builder()
            .uri("/tts/broken")
            .header(USER_ID_HEADER, "u-1")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
