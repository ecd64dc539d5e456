pub mod health;
pub mod nodes;

pub use health::*;
pub use nodes::*;

use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;
use std::sync::Arc;

use crate::biteship::BiteshipClient;
use crate::node::NodeRegistry;
use crate::observability::RequestTracingMiddleware;

/// The runner's routes: the API itself, Swagger UI at `/docs` and the
/// OpenAPI document at `/spec`, all behind request tracing.
pub fn build_app(
    client: Arc<BiteshipClient>,
    registry: Arc<NodeRegistry>,
    server_url: &str,
) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (HealthApi::with_client(client.clone()), NodesApi::new(registry, client)),
        "Biteship Nodes API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/docs", ui)
        .nest("/spec", spec)
        .nest("/", api_service)
        .with(RequestTracingMiddleware)
}
