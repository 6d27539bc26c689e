mod guests;
mod join;
mod msg;
mod room;
mod ws;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::room))
        .route("/register", post(join::register))
        .route("/send", post(msg::send))
        .route("/guests", post(guests::invite))
        .route("/ws", get(ws::room_ws))
}
