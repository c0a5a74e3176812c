use agora::kernel::prelude::ApiState;
use agora::kernel::server::flash::session_layer;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Agora", description = "Forum thread service"))]
struct ApiDoc;

/// Full application router: system and forum routes, session and tracing layers,
/// and the Scalar API reference under `/api`.
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();
    let sessions = session_layer(&state.config.session);

    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(agora::server::router::system_router())
        .merge(agora::server::router::forums_router())
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
