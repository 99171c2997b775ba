use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

#[derive(Serialize)]
struct Liveness {
    message: String,
}

/// `GET /` answering with a fixed message
pub fn router(message: &str) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .with_state(message.to_owned())
}

async fn liveness_handler(State(message): State<String>) -> Json<Liveness> {
    Json(Liveness { message })
}
