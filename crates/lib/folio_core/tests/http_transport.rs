//! Integration test — drive a widget over HTTP against a stub chat endpoint.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use folio_core::chat::transport::HttpTransport;
use folio_core::chat::widget::ChatWidget;
use folio_core::chat::{CONNECTION_APOLOGY, ChatMessage, ChatRequest, ChatResponse};

type Seen = Arc<Mutex<Vec<ChatRequest>>>;

async fn spawn_endpoint(status: StatusCode, reply: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/api/chat",
            post(
                move |State(seen): State<Seen>, Json(req): Json<ChatRequest>| async move {
                    seen.lock().unwrap().push(req);
                    (
                        status,
                        Json(ChatResponse {
                            response: reply.to_string(),
                        }),
                    )
                },
            ),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind endpoint");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{addr}"), seen)
}

#[tokio::test]
async fn widget_round_trip_over_http() {
    let (server, seen) = spawn_endpoint(StatusCode::OK, "Test reply").await;
    let widget = ChatWidget::new("Hi!", HttpTransport::new(&server).expect("transport"));

    widget.submit("Hello").await.expect("accepted");

    assert_eq!(
        widget.messages(),
        [
            ChatMessage::assistant("Hi!"),
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Test reply"),
        ]
    );

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "Hello");
    assert_eq!(seen[0].history, [ChatMessage::assistant("Hi!")]);
}

#[tokio::test]
async fn server_error_shows_connection_apology() {
    let (server, _seen) =
        spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "server apology").await;
    let widget = ChatWidget::new("Hi!", HttpTransport::new(&server).expect("transport"));

    widget.submit("Hello").await.expect("accepted");

    let last = widget.last_message().expect("message");
    assert_eq!(last, ChatMessage::assistant(CONNECTION_APOLOGY));
    assert!(!widget.is_loading());
}
