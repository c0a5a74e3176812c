use super::handlers;
use agora_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Forum routes; needs the session layer from `agora_kernel::server::flash`.
pub fn forums_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::forums_home))
        .routes(routes!(handlers::forum_page))
        .routes(routes!(handlers::browse_thread, handlers::delete_thread))
        .routes(routes!(handlers::share_thread))
        .routes(routes!(handlers::new_thread_form, handlers::create_thread))
}
