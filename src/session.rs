use std::{collections::HashMap, sync::Arc};

use time::{Duration, OffsetDateTime};
use tokio::sync::{broadcast, Mutex, MutexGuard};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    chat::{
        guests,
        store::{ChatEvent, SessionStore},
        User,
    },
    AppResult,
};

pub const CHAT_ID: &str = "chat_id";

/// One page session's store plus the feed of what happens to it.
#[derive(Clone)]
pub struct ChatHandle {
    store: Arc<Mutex<SessionStore>>,
    events: broadcast::Sender<ChatEvent>,
}

impl ChatHandle {
    pub fn new(capacity: usize) -> Self {
        ChatHandle {
            store: Arc::new(Mutex::new(SessionStore::new())),
            events: broadcast::channel(capacity).0,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    fn publish(&self, events: impl IntoIterator<Item = ChatEvent>) {
        for event in events {
            // nobody listening is fine
            let _ = self.events.send(event);
        }
    }

    /// A page session registers once. Returns false if it already has an identity.
    pub async fn register(&self, user: User) -> bool {
        let (user_id, nickname) = (user.id, user.nickname.clone());
        let events = {
            let mut store = self.store.lock().await;
            if store.is_registered() {
                return false;
            }
            store.register(user)
        };

        tracing::info!(%user_id, %nickname, "registered");
        self.publish(events);
        true
    }

    pub async fn send(&self, text: &str) -> bool {
        let event = self.store.lock().await.send(text);
        let sent = event.is_some();
        self.publish(event);
        sent
    }

    pub async fn update_profile(&self, user: User) -> bool {
        let user_id = user.id;
        let event = self.store.lock().await.update_profile(user);
        let updated = event.is_some();
        if updated {
            tracing::info!(%user_id, "profile updated");
        } else {
            tracing::warn!(%user_id, "profile update for unknown user");
        }
        self.publish(event);
        updated
    }

    pub async fn invite_guest(&self) -> User {
        let guest = guests::invent_guest(&mut rand::rng());
        tracing::debug!(user_id = %guest.id, nickname = %guest.nickname, "guest joined");
        let events = self.store.lock().await.admit(guest.clone());
        self.publish(events);
        guest
    }

    /// With probability `chance`, one of the guests says something.
    pub async fn maybe_guest_reply(&self, chance: f64) -> bool {
        let event = {
            let mut store = self.store.lock().await;
            let mut rng = rand::rng();
            if !rand::Rng::random_bool(&mut rng, chance) {
                return false;
            }
            guests::reply(&mut store, &mut rng)
        };
        let replied = event.is_some();
        self.publish(event);
        replied
    }
}

struct Slot {
    chat: ChatHandle,
    last_seen: OffsetDateTime,
}

/// Chats by page session. A chat nobody has touched for `idle` is dropped.
#[derive(Clone)]
pub struct ChatRegistry {
    chats: Arc<Mutex<HashMap<Uuid, Slot>>>,
    capacity: usize,
    idle: Duration,
}

impl ChatRegistry {
    pub fn new(capacity: usize, idle: Duration) -> Self {
        ChatRegistry {
            chats: Arc::default(),
            capacity,
            idle,
        }
    }

    /// The chat of this page session, if it has one. Never creates anything.
    pub async fn find(&self, session: &Session) -> AppResult<Option<ChatHandle>> {
        let Some(chat_id) = session.get::<Uuid>(CHAT_ID).await? else {
            return Ok(None);
        };
        Ok(self.find_at(chat_id, OffsetDateTime::now_utc()).await)
    }

    /// The chat of this page session, created along with the session key if missing.
    pub async fn open(&self, session: &Session) -> AppResult<ChatHandle> {
        let chat_id = match session.get::<Uuid>(CHAT_ID).await? {
            Some(chat_id) => chat_id,
            None => {
                let chat_id = Uuid::now_v7();
                session.insert(CHAT_ID, chat_id).await?;
                chat_id
            }
        };
        Ok(self.open_at(chat_id, OffsetDateTime::now_utc()).await)
    }

    async fn find_at(&self, chat_id: Uuid, now: OffsetDateTime) -> Option<ChatHandle> {
        let mut chats = self.chats.lock().await;
        self.evict_idle(&mut chats, now);

        let slot = chats.get_mut(&chat_id)?;
        slot.last_seen = now;
        Some(slot.chat.clone())
    }

    async fn open_at(&self, chat_id: Uuid, now: OffsetDateTime) -> ChatHandle {
        let mut chats = self.chats.lock().await;
        self.evict_idle(&mut chats, now);

        let slot = chats.entry(chat_id).or_insert_with(|| {
            tracing::debug!(%chat_id, "new chat");
            Slot {
                chat: ChatHandle::new(self.capacity),
                last_seen: now,
            }
        });
        slot.last_seen = now;
        slot.chat.clone()
    }

    fn evict_idle(&self, chats: &mut HashMap<Uuid, Slot>, now: OffsetDateTime) {
        let before = chats.len();
        chats.retain(|_, slot| now - slot.last_seen < self.idle);

        let evicted = before - chats.len();
        if evicted > 0 {
            tracing::debug!(evicted, "dropped idle chats");
        }
    }
}
