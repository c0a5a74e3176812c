use crate::gateway::ThreadKey;
use crate::guard::CreateThreadOutcome;
use crate::views::{
    CreateThreadForm, CreateThreadView, FORUMS_HOME_URL, ForumView, ForumsHomeView, Navigation,
    ThreadPreview, ThreadView,
};
use crate::{Forums, ForumsError};
use agora_derive::api_handler;
use agora_kernel::context::RequestContext;
use agora_kernel::domain::constants::FORUMS_TAG;
use agora_kernel::security::identity::Identity;
use agora_kernel::server::flash::{persist_flash, take_flash};
use agora_kernel::server::state::ApiState;
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(super) struct PageQuery {
    /// 1-based page number, defaults to 1
    page: Option<i64>,
}

impl PageQuery {
    fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

fn forums(state: &ApiState) -> Result<&Forums, ForumsError> {
    state.try_get_slice::<Forums>().map_err(|err| ForumsError::from(err.to_string()))
}

async fn load_context(
    identity: Identity,
    session: &Session,
) -> Result<RequestContext, ForumsError> {
    let mut ctx = RequestContext::new(identity);
    ctx.flash = take_flash(session).await.map_err(|err| ForumsError::from(err.to_string()))?;
    Ok(ctx)
}

async fn save_flash(ctx: RequestContext, session: &Session) -> Result<(), ForumsError> {
    persist_flash(session, ctx.flash).await.map_err(|err| ForumsError::from(err.to_string()))
}

#[api_handler(
    get,
    path = "/forums",
    responses((status = OK, description = "Active forums and pending flash errors", body = ForumsHomeView)),
    tag = FORUMS_TAG,
)]
pub(super) async fn forums_home(
    State(state): State<ApiState>,
    identity: Identity,
    session: Session,
) -> Result<Response, ForumsError> {
    let mut ctx = load_context(identity, &session).await?;
    let view = forums(&state)?.forums_home(&mut ctx).await?;
    Ok(Json(view).into_response())
}

#[api_handler(
    get,
    path = "/forums/{forum_slug}",
    params(("forum_slug" = String, Path, description = "Forum slug"), PageQuery),
    responses(
        (status = OK, description = "One page of the forum's threads", body = ForumView),
        (status = SEE_OTHER, description = "Page below 1, or forum missing"),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn forum_page(
    State(state): State<ApiState>,
    identity: Identity,
    session: Session,
    Path(forum_slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ForumsError> {
    let mut ctx = RequestContext::new(identity);
    let outcome = forums(&state)?.forum_page(&mut ctx, &forum_slug, query.page()).await?;
    save_flash(ctx, &session).await?;
    Ok(outcome.into_response())
}

#[api_handler(
    get,
    path = "/forums/threads/{key}",
    params(("key" = String, Path, description = "Thread id or slug"), PageQuery),
    responses(
        (status = OK, description = "One page of the thread", body = ThreadView),
        (status = SEE_OTHER, description = "Canonical slug URL, or forums home when missing"),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn browse_thread(
    State(state): State<ApiState>,
    identity: Identity,
    session: Session,
    Path(key): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ForumsError> {
    let mut ctx = RequestContext::new(identity);
    let key = ThreadKey::from(key.as_str());
    let outcome: Navigation<ThreadView> =
        forums(&state)?.resolve_thread(&mut ctx, &key, query.page()).await?;
    save_flash(ctx, &session).await?;
    Ok(outcome.into_response())
}

#[api_handler(
    delete,
    path = "/forums/threads/{key}",
    params(("key" = u64, Path, description = "Thread id")),
    responses(
        (status = OK, description = "Thread soft-deleted"),
        (status = BAD_REQUEST, description = "Thread is locked"),
        (status = UNAUTHORIZED, description = "Missing role claim or not the author"),
        (status = NOT_FOUND, description = "Thread missing or already deleted"),
        (status = INTERNAL_SERVER_ERROR, description = "Data context failure"),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn delete_thread(
    State(state): State<ApiState>,
    identity: Identity,
    Path(key): Path<String>,
) -> Result<StatusCode, ForumsError> {
    let ThreadKey::Id(thread_id) = ThreadKey::from(key.as_str()) else {
        return Err(ForumsError::NotFound { message: key.into(), context: None });
    };
    forums(&state)?.delete_thread(&RequestContext::new(identity), thread_id).await?;
    Ok(StatusCode::OK)
}

#[api_handler(
    get,
    path = "/forums/threads/{slug}/share",
    params(("slug" = String, Path, description = "Thread slug")),
    responses(
        (status = OK, description = "Plain-text preview and share link", body = ThreadPreview),
        (status = NOT_FOUND, description = "Thread missing, deleted or in an inactive forum"),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn share_thread(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<Json<ThreadPreview>, ForumsError> {
    Ok(Json(forums(&state)?.share_thread(&slug).await?))
}

#[api_handler(
    get,
    path = "/forums/{forum_slug}/threads/new",
    params(("forum_slug" = String, Path, description = "Parent forum slug")),
    responses(
        (status = OK, description = "Empty form", body = CreateThreadView),
        (status = SEE_OTHER, description = "Forum missing"),
        (status = UNAUTHORIZED, description = "Missing forums-writer claim"),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn new_thread_form(
    State(state): State<ApiState>,
    identity: Identity,
    Path(forum_slug): Path<String>,
) -> Result<Response, ForumsError> {
    let ctx = RequestContext::new(identity);
    Ok(match forums(&state)?.new_thread_form(&ctx, &forum_slug).await? {
        Some(view) => Json(view).into_response(),
        None => Redirect::to(FORUMS_HOME_URL).into_response(),
    })
}

#[api_handler(
    post,
    path = "/forums/{forum_slug}/threads/new",
    params(("forum_slug" = String, Path, description = "Parent forum slug")),
    request_body(content = CreateThreadForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = SEE_OTHER, description = "Created, or forum missing"),
        (status = UNAUTHORIZED, description = "Missing forums-writer claim"),
        (status = UNPROCESSABLE_ENTITY, description = "Field errors", body = CreateThreadView),
        (status = INTERNAL_SERVER_ERROR, description = "Data context failure", body = CreateThreadView),
    ),
    tag = FORUMS_TAG,
)]
pub(super) async fn create_thread(
    State(state): State<ApiState>,
    identity: Identity,
    Path(forum_slug): Path<String>,
    Form(form): Form<CreateThreadForm>,
) -> Result<Response, ForumsError> {
    let ctx = RequestContext::new(identity);
    let outcome = forums(&state)?.submit_thread(&ctx, &forum_slug, form).await?;

    Ok(match outcome {
        CreateThreadOutcome::Created { redirect, .. } => Redirect::to(&redirect).into_response(),
        CreateThreadOutcome::ForumMissing => Redirect::to(FORUMS_HOME_URL).into_response(),
        CreateThreadOutcome::Invalid(view) => form_response(StatusCode::UNPROCESSABLE_ENTITY, view),
        CreateThreadOutcome::Failed(view) => form_response(StatusCode::INTERNAL_SERVER_ERROR, view),
    })
}

fn form_response(status: StatusCode, view: CreateThreadView) -> Response {
    (status, Json(view)).into_response()
}
