use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Response}};
use tower_sessions::Session;

use crate::{render, session::ChatRegistry, AppResult, AppState};

/// Registration form until this page session has an identity, the room after.
#[debug_handler(state = AppState)]
pub(crate) async fn room(
    State(chats): State<ChatRegistry>,
    session: Session,
) -> AppResult<Response> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(Html(render::registration_page(None).into_string()).into_response());
    };
    let store = chat.lock().await;

    let markup = match store.current() {
        Some(me) => render::room_page(&store, me, None),
        None => render::registration_page(None),
    };

    Ok(Html(markup.into_string()).into_response())
}
