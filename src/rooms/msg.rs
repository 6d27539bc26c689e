use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::{
    chat::forms::{ComposerForm, FormError},
    render,
    session::{ChatHandle, ChatRegistry},
    AppResult, AppState, Config,
};

/// Blank text is not an error, it just sends nothing. Returns whether a
/// message was appended.
pub(crate) async fn send_msg(
    chat: &ChatHandle,
    config: &Config,
    form: &ComposerForm,
) -> Result<bool, FormError> {
    let text = match form.validate() {
        Ok(text) => text,
        Err(FormError::EmptyMessage) => return Ok(false),
        Err(err) => return Err(err),
    };

    if !chat.send(text).await {
        return Ok(false);
    }

    chat.maybe_guest_reply(config.guest_reply_chance).await;
    Ok(true)
}

#[debug_handler(state = AppState)]
pub(crate) async fn send(
    State(chats): State<ChatRegistry>,
    State(config): State<Arc<Config>>,
    session: Session,

    Form(form): Form<ComposerForm>,
) -> AppResult<Response> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let Err(err) = send_msg(&chat, &config, &form).await else {
        return Ok(Redirect::to("/").into_response());
    };

    let store = chat.lock().await;
    let Some(me) = store.current() else {
        return Ok(Redirect::to("/").into_response());
    };
    let page = render::room_page(&store, me, Some(&err.to_string()));
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response())
}
