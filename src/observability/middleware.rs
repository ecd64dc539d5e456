use poem::http::HeaderValue;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result as PoemResult};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-Id";

/// Runs every request inside an `http_request` span with a fresh request id
/// and the caller's correlation id (generated when absent). Both ids are
/// echoed on the response.
pub struct RequestTracingMiddleware;

impl<E: Endpoint> Middleware<E> for RequestTracingMiddleware {
    type Output = RequestTracingEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RequestTracingEndpoint { ep }
    }
}

pub struct RequestTracingEndpoint<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for RequestTracingEndpoint<E> {
    type Output = Response;

    async fn call(&self, mut req: Request) -> PoemResult<Self::Output> {
        let request_id = Uuid::new_v4().to_string();
        let correlation_id =
            extract_correlation_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

        set_header(req.headers_mut(), REQUEST_ID_HEADER, &request_id);
        set_header(req.headers_mut(), CORRELATION_ID_HEADER, &correlation_id);

        let span = info_span!(
            "http_request",
            request_id = %request_id,
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.uri().path(),
        );

        async move {
            let started = Instant::now();
            let mut response = match self.ep.call(req).await {
                Ok(output) => output.into_response(),
                Err(error) => error.into_response(),
            };
            info!(
                status = response.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request completed"
            );

            set_header(response.headers_mut(), REQUEST_ID_HEADER, &request_id);
            set_header(response.headers_mut(), CORRELATION_ID_HEADER, &correlation_id);
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

fn set_header(headers: &mut poem::http::HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

pub fn extract_request_id(req: &Request) -> Option<String> {
    req.header(REQUEST_ID_HEADER).map(|s| s.to_string())
}

pub fn extract_correlation_id(req: &Request) -> Option<String> {
    req.header(CORRELATION_ID_HEADER).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::{handler, EndpointExt, Route};

    #[handler]
    fn echo_ids(req: &Request) -> String {
        format!(
            "{}|{}",
            extract_request_id(req).unwrap_or_default(),
            extract_correlation_id(req).unwrap_or_default()
        )
    }

    #[tokio::test]
    async fn test_ids_reach_handler_and_response() {
        let app = Route::new().at("/", echo_ids).with(RequestTracingMiddleware);
        let cli = TestClient::new(app);

        let resp = cli
            .get("/")
            .header(CORRELATION_ID_HEADER, "corr-123")
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.assert_header(CORRELATION_ID_HEADER, "corr-123");
        resp.assert_header_exist(REQUEST_ID_HEADER);

        let body = resp.0.into_body().into_string().await.unwrap();
        let (request_id, correlation_id) = body.split_once('|').unwrap();
        assert!(Uuid::parse_str(request_id).is_ok());
        assert_eq!(correlation_id, "corr-123");
    }

    #[tokio::test]
    async fn test_correlation_id_generated_when_absent() {
        let app = Route::new().at("/", echo_ids).with(RequestTracingMiddleware);
        let resp = TestClient::new(app).get("/").send().await;

        let correlation_id = resp
            .0
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();
        assert!(Uuid::parse_str(&correlation_id).is_ok());
    }

    #[tokio::test]
    async fn test_error_responses_keep_ids() {
        let app = Route::new().at("/", echo_ids).with(RequestTracingMiddleware);
        let resp = TestClient::new(app).get("/missing").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_header_exist(REQUEST_ID_HEADER);
    }

    #[test]
    fn test_missing_request_id() {
        let req = Request::builder().finish();
        assert!(extract_request_id(&req).is_none());
    }
}
