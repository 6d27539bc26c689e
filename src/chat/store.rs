use super::{Message, Sender, User, UserId};

/// What a store mutation did. Listeners react to these instead of diffing
/// snapshots of the roster and the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Joined(User),
    MessageAdded(Message),
    ProfileUpdated(User),
}

/// Identity, roster and message log of one page session.
///
/// Both collections are append-only. Users are only ever replaced in place
/// by [`SessionStore::update_profile`] and messages are never touched again.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<UserId>,
    roster: Vec<User>,
    messages: Vec<Message>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_id(&self) -> Option<UserId> {
        self.current
    }

    pub fn current(&self) -> Option<&User> {
        self.current.and_then(|id| self.find_user(id))
    }

    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.roster.iter().find(|user| user.id == id)
    }

    /// Makes `user` the current identity and announces them.
    pub fn register(&mut self, user: User) -> Vec<ChatEvent> {
        self.current = Some(user.id);
        self.admit(user)
    }

    /// Adds a participant without touching the current identity.
    pub fn admit(&mut self, user: User) -> Vec<ChatEvent> {
        let announcement = Message::new(Sender::System, format!("{} joined the chat! 👋", user.nickname));

        self.roster.push(user.clone());
        self.messages.push(announcement.clone());

        vec![
            ChatEvent::Joined(user),
            ChatEvent::MessageAdded(announcement),
        ]
    }

    /// No-op without a current identity or for blank text.
    pub fn send(&mut self, text: &str) -> Option<ChatEvent> {
        let id = self.current?;
        self.post_as(id, text)
    }

    pub fn post_as(&mut self, id: UserId, text: &str) -> Option<ChatEvent> {
        if text.trim().is_empty() || self.find_user(id).is_none() {
            return None;
        }

        let message = Message::new(Sender::User(id), text);
        self.messages.push(message.clone());
        Some(ChatEvent::MessageAdded(message))
    }

    /// Verbatim replace-by-id. Unknown ids change nothing.
    pub fn update_profile(&mut self, user: User) -> Option<ChatEvent> {
        let slot = self.roster.iter_mut().find(|entry| entry.id == user.id)?;
        *slot = user.clone();
        self.current = Some(user.id);
        Some(ChatEvent::ProfileUpdated(user))
    }
}
