use super::handlers::{health, session};
use crate::gate::state::GateState;
use std::sync::Arc;
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec. The gated site routes are
/// intentionally not documented.
pub(crate) fn api_router() -> OpenApiRouter<Arc<GateState>> {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(session::session))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service health".to_string());

    let mut session_tag = Tag::new("session");
    session_tag.description = Some("Session status".to_string());

    OpenApiBuilder::new()
        .info(info)
        .tags(Some(vec![health_tag, session_tag]))
        .build()
}
