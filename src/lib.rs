pub mod appresult;
pub mod chat;
pub mod config;
pub mod notify;
pub mod profiles;
pub mod render;
pub mod res;
pub mod rooms;
pub mod session;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;
use session::ChatRegistry;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub chats: ChatRegistry,
    pub config: Arc<Config>,
}

pub fn build_router(config: Config) -> Router {
    let idle = time::Duration::minutes(config.session_idle_minutes);
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(idle));

    let app_state = AppState {
        chats: ChatRegistry::new(config.event_capacity, idle),
        config: Arc::new(config),
    };

    Router::new()
        .merge(rooms::router())
        .merge(profiles::router())
        .nest("/static", res::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
