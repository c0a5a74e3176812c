use agora::domain::config::ApiConfig;
use agora::domain::forums::NewThread;
use agora::features::forums::data::{ForumsDataContext, InMemoryForums};
use agora_server::Server;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const WRITER: &str = "writer-1";

struct App {
    router: Router,
    store: Arc<InMemoryForums>,
}

fn app() -> App {
    let mut config = ApiConfig::default();
    config.forums.page_size = 5;
    config.forums.public_base_url = "https://forum.example".to_owned();

    let store = Arc::new(InMemoryForums::from_config(&config.forums));
    let server = Server::builder().config(config).forums_data(store.clone()).build().unwrap();
    App { router: server.router(), store }
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn as_writer(method: Method, uri: &str, user_id: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id)
        .header("x-user-roles", "forums-writer")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

async fn seed(store: &InMemoryForums, author_id: &str, title: &str) -> agora::domain::forums::Thread {
    let forum = store.get_forum_by_slug("general").await.unwrap().unwrap();
    store
        .create_thread(NewThread {
            forum_id: forum.id,
            author_id: author_id.to_owned(),
            title: title.to_owned(),
            content: "Opening *post*".to_owned(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_up() {
    let app = app();
    let response = send(&app.router, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "up");
}

#[tokio::test]
async fn missing_thread_flashes_error_onto_forums_home() {
    let app = app();

    let response = send(&app.router, get("/forums/threads/no-such-thread")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/forums");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_owned();

    let home = Request::builder().uri("/forums").header(header::COOKIE, &cookie).body(Body::empty());
    let body = json(send(&app.router, home.unwrap()).await).await;
    assert_eq!(body["errors"][0], "That thread does not exist.");
    assert_eq!(body["forums"][0]["slug"], "general");

    let again = Request::builder().uri("/forums").header(header::COOKIE, &cookie).body(Body::empty());
    let body = json(send(&app.router, again.unwrap()).await).await;
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn id_route_redirects_to_canonical_slug() {
    let app = app();
    let thread = seed(&app.store, WRITER, "Raid night").await;

    let response = send(&app.router, get(&format!("/forums/threads/{}?page=2", thread.id))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/forums/threads/raid-night?page=2");

    let response = send(&app.router, get("/forums/threads/raid-night?page=0")).await;
    assert_eq!(location(&response), "/forums/threads/raid-night");

    let response = send(&app.router, get("/forums/threads/raid-night")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["lastPage"], 1);
    assert_eq!(body["breadcrumbs"][1]["url"], "/forums/general");
}

#[tokio::test]
async fn non_ascii_titles_redirect_to_valid_locations() {
    let app = app();
    let thread = seed(&app.store, WRITER, "Café night").await;
    assert_eq!(thread.slug, "caf-night");

    let response = send(&app.router, get(&format!("/forums/threads/{}", thread.id))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/forums/threads/caf-night?page=1");

    let response = send(&app.router, get("/forums/threads/caf-night")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app.router, get("/forums/threads/caf%C3%A9%3Fx?page=0")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/forums/threads/caf%C3%A9%3Fx");

    let response = send(&app.router, get("/forums/caf%C3%A9?page=0")).await;
    assert_eq!(location(&response), "/forums/caf%C3%A9");
}

#[tokio::test]
async fn huge_page_number_renders_an_empty_page() {
    let app = app();
    seed(&app.store, WRITER, "Raid night").await;

    let response =
        send(&app.router, get(&format!("/forums/threads/raid-night?page={}", i64::MAX))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["replies"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["lastPage"], 1);

    let response = send(&app.router, get(&format!("/forums/general?page={}", i64::MAX))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["threads"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn create_thread_requires_writer_and_valid_form() {
    let app = app();
    let uri = "/forums/general/threads/new";

    let anonymous = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("title=Hello+there&content=Hi"))
        .unwrap();
    assert_eq!(send(&app.router, anonymous).await.status(), StatusCode::UNAUTHORIZED);

    let invalid = as_writer(Method::POST, uri, WRITER, Body::from("title=%23%23&content="));
    let response = send(&app.router, invalid).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json(response).await;
    assert_eq!(body["title"], "##");
    assert_eq!(body["errors"][0]["field"], "content");

    let valid = as_writer(Method::POST, uri, WRITER, Body::from("title=Weekly+raid&content=Be+there"));
    let response = send(&app.router, valid).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/forums/general");
    assert!(app.store.get_thread_by_slug("weekly-raid").await.unwrap().is_some());

    let missing = as_writer(Method::POST, "/forums/nowhere/threads/new", WRITER, Body::from("title=Hi+all&content=x"));
    assert_eq!(location(&send(&app.router, missing).await), "/forums");
}

#[tokio::test]
async fn delete_enforces_authorship_then_lock() {
    let app = app();
    let thread = seed(&app.store, WRITER, "Mine to delete").await;
    let uri = format!("/forums/threads/{}", thread.id);

    let response = send(&app.router, as_writer(Method::DELETE, &uri, "someone-else", Body::empty())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(text(response).await, "You are not the author of this post.");

    app.store.set_thread_locked(thread.id, true);
    let response = send(&app.router, as_writer(Method::DELETE, &uri, WRITER, Body::empty())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await, "The thread is locked, therefore you cannot delete the thread.");

    app.store.set_thread_locked(thread.id, false);
    let response = send(&app.router, as_writer(Method::DELETE, &uri, WRITER, Body::empty())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app.router, as_writer(Method::DELETE, &uri, WRITER, Body::empty())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn share_returns_preview_or_not_found() {
    let app = app();
    let thread = seed(&app.store, WRITER, "Share me").await;

    let response = send(&app.router, get("/forums/threads/share-me/share")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["contentPreview"], "Opening post");
    assert_eq!(body["shareLink"], format!("https://forum.example/forums/threads/{}", thread.id));

    let response = send(&app.router, get("/forums/threads/unknown/share")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_reference_is_served() {
    let app = app();
    let response = send(&app.router, get("/api")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
