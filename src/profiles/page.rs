use axum::{debug_handler, extract::State, http::StatusCode, response::{Html, IntoResponse, Redirect, Response}, Form};
use tower_sessions::Session;

use crate::{chat::forms::ProfileForm, render, session::ChatRegistry, AppResult, AppState};

#[debug_handler(state = AppState)]
pub(crate) async fn profile(
    State(chats): State<ChatRegistry>,
    session: Session,
) -> AppResult<Response> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    let store = chat.lock().await;

    let Some(me) = store.current() else {
        return Ok(Redirect::to("/").into_response());
    };

    Ok(Html(render::profile_page(me, None).into_string()).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_profile(
    State(chats): State<ChatRegistry>,
    session: Session,

    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(me) = chat.lock().await.current().cloned() else {
        return Ok(Redirect::to("/").into_response());
    };

    match form.apply(&me) {
        Ok(edited) => {
            chat.update_profile(edited).await;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            let page = render::profile_page(&me, Some(&err.to_string()));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response())
        }
    }
}
