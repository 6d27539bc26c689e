pub mod forms;
pub mod guests;
pub mod store;
pub mod view;

use std::fmt;

use time::OffsetDateTime;
use uuid::Uuid;

pub const AVATARS: [&str; 12] = ["😀", "😎", "🚀", "🎨", "🎮", "🎵", "⚡", "🔥", "💎", "🌟", "🦄", "🐱"];
pub const COLORS: [&str; 8] = [
    "#8B5CF6",
    "#D946EF",
    "#F97316",
    "#0EA5E9",
    "#10B981",
    "#F59E0B",
    "#EF4444",
    "#EC4899",
];

pub const NICKNAME_MAX: usize = 20;
pub const MESSAGE_MAX: usize = 500;
pub const CUSTOM_STATUS_MAX: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Last six hex digits, enough to tell people with the same nickname apart.
    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[simple.len() - 6..].to_owned()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nothing ever moves a user to `Offline`: there is no disconnect handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub avatar: String,
    pub color: String,
    pub status: Status,
    pub profile_link: String,
    pub custom_status: String,
}

impl User {
    pub fn new(nickname: &str, avatar: &str, color: &str) -> Self {
        User {
            id: UserId::new(),
            nickname: nickname.to_owned(),
            avatar: avatar.to_owned(),
            color: color.to_owned(),
            status: Status::Online,
            profile_link: default_profile_link(nickname),
            custom_status: "Online".to_owned(),
        }
    }
}

/// `@` followed by the nickname lowercased with whitespace dropped.
pub fn default_profile_link(nickname: &str) -> String {
    let handle: String = nickname
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("@{handle}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    System,
    User(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: OffsetDateTime,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Message {
            id: Uuid::now_v7(),
            sender,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == Sender::System
    }
}
