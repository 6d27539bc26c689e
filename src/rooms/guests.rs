use axum::{debug_handler, extract::State, response::Redirect};
use tower_sessions::Session;

use crate::{session::ChatRegistry, AppResult, AppState};

#[debug_handler(state = AppState)]
pub(crate) async fn invite(
    State(chats): State<ChatRegistry>,
    session: Session,
) -> AppResult<Redirect> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(Redirect::to("/"));
    };
    if chat.lock().await.is_registered() {
        chat.invite_guest().await;
    }

    Ok(Redirect::to("/"))
}
