use axum::{debug_handler, extract::State, http::StatusCode, response::{Html, IntoResponse, Redirect, Response}, Form};
use tower_sessions::Session;

use crate::{chat::forms::RegistrationForm, render, session::ChatRegistry, AppResult, AppState};

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(chats): State<ChatRegistry>,
    session: Session,

    Form(form): Form<RegistrationForm>,
) -> AppResult<Response> {
    let user = match form.into_user() {
        Ok(user) => user,
        Err(err) => {
            let page = render::registration_page(Some(&err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response());
        }
    };

    let chat = chats.open(&session).await?;
    if !chat.register(user).await {
        tracing::debug!("page session already registered");
    }

    Ok(Redirect::to("/").into_response())
}
