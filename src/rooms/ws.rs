use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{ws::{Message as WsMessage, WebSocket}, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tower_sessions::Session;

use crate::{
    chat::{forms::ComposerForm, store::ChatEvent, view::message_view},
    notify::{self, Notification, NotificationGate, Notifier, Permission, Toast},
    render,
    rooms::msg,
    session::{ChatHandle, ChatRegistry},
    AppResult, AppState, Config,
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    Hello { permission: Permission, hidden: bool },
    Permission { permission: Permission },
    Visibility { hidden: bool },
    Send { text: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerFrame {
    RequestPermission,
    Notify(Notification),
    Toast(Toast),
    Message { html: String },
    Roster { html: String },
}

/// The browser tab on the other end of the socket.
struct PageNotifier {
    hidden: bool,
    out: mpsc::UnboundedSender<ServerFrame>,
}

impl PageNotifier {
    fn push(&self, frame: ServerFrame) {
        let _ = self.out.send(frame);
    }
}

impl Notifier for PageNotifier {
    fn document_hidden(&self) -> bool {
        self.hidden
    }

    fn show(&self, notification: Notification) {
        self.push(ServerFrame::Notify(notification));
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn room_ws(
    State(chats): State<ChatRegistry>,
    State(config): State<Arc<Config>>,
    session: Session,

    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let Some(chat) = chats.find(&session).await? else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    Ok(ws.on_upgrade(move |stream| serve_page(stream, chat, config)))
}

async fn serve_page(stream: WebSocket, chat: ChatHandle, config: Arc<Config>) {
    let (mut sender, mut receiver) = stream.split();
    let (out, mut frames) = mpsc::unbounded_channel::<ServerFrame>();

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            let Ok(text) = serde_json::to_string(&frame) else {
                continue;
            };
            if sender.send(WsMessage::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut events = chat.subscribe();
    let mut page = PageNotifier { hidden: false, out };
    // set up once the page says hello
    let mut gate: Option<NotificationGate> = None;

    tracing::debug!("page connected");

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let Some(Ok(msg)) = incoming else {
                    break;
                };
                if let WsMessage::Close(_) = msg {
                    break;
                }
                let Ok(frame) = serde_json::from_slice::<ClientFrame>(&msg.into_data()) else {
                    continue;
                };
                handle_frame(frame, &chat, &config, &mut page, &mut gate).await;
            }
            event = events.recv() => match event {
                Ok(event) => forward(&event, &chat, &page, gate.as_ref()).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "page fell behind the chat");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = &mut writer => break,
        }
    }

    writer.abort();
    tracing::debug!("page disconnected");
}

async fn handle_frame(
    frame: ClientFrame,
    chat: &ChatHandle,
    config: &Config,
    page: &mut PageNotifier,
    gate: &mut Option<NotificationGate>,
) {
    match frame {
        ClientFrame::Hello { permission, hidden } => {
            page.hidden = hidden;
            if gate.is_some() {
                return;
            }
            let (new_gate, request) = NotificationGate::init(permission);
            if request.is_some() {
                page.push(ServerFrame::RequestPermission);
            }
            *gate = Some(new_gate);
        }
        ClientFrame::Permission { permission } => {
            if let Some(gate) = gate {
                gate.resolve(permission);
            }
        }
        ClientFrame::Visibility { hidden } => page.hidden = hidden,
        ClientFrame::Send { text } => {
            if let Err(err) = msg::send_msg(chat, config, &ComposerForm { text }).await {
                tracing::debug!(%err, "message rejected");
            }
        }
    }
}

async fn forward(
    event: &ChatEvent,
    chat: &ChatHandle,
    page: &PageNotifier,
    gate: Option<&NotificationGate>,
) {
    let (frame, toast, alert) = {
        let store = chat.lock().await;
        let current = store.current_id();

        let frame = match event {
            ChatEvent::MessageAdded(message) => ServerFrame::Message {
                html: render::message_item(message_view(message, store.roster(), current)).into_string(),
            },
            ChatEvent::Joined(_) | ChatEvent::ProfileUpdated(_) => ServerFrame::Roster {
                html: render::roster_panel(store.roster(), current).into_string(),
            },
        };

        let toast = notify::toast_for(event, current, store.roster());
        (frame, toast, notify::alert_for(event, current, store.roster()))
    };

    page.push(frame);
    if let Some(toast) = toast {
        page.push(ServerFrame::Toast(toast));
    }
    if let (Some(gate), Some(alert)) = (gate, alert) {
        gate.notify(page, alert);
    }
}
