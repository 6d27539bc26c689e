//! Values derived from a store snapshot on every render.

use super::{Message, Sender, Status, User, UserId};

pub struct RosterSplit<'a> {
    pub online: Vec<&'a User>,
    pub offline: Vec<&'a User>,
}

pub fn split_roster(roster: &[User]) -> RosterSplit<'_> {
    let (online, offline): (Vec<&User>, Vec<&User>) =
        roster.iter().partition(|user| user.status == Status::Online);
    RosterSplit { online, offline }
}

pub fn find_sender(roster: &[User], sender: Sender) -> Option<&User> {
    match sender {
        Sender::System => None,
        Sender::User(id) => roster.iter().find(|user| user.id == id),
    }
}

pub fn is_own(message: &Message, current: Option<UserId>) -> bool {
    matches!((message.sender, current), (Sender::User(id), Some(me)) if id == me)
}

pub fn status_line(user: &User) -> &str {
    if !user.custom_status.is_empty() {
        return &user.custom_status;
    }
    match user.status {
        Status::Online => "Online",
        Status::Offline => "Offline",
    }
}

pub enum MessageView<'a> {
    Announcement(&'a Message),
    Bubble {
        message: &'a Message,
        sender: Option<&'a User>,
        own: bool,
    },
}

pub fn message_view<'a>(message: &'a Message, roster: &'a [User], current: Option<UserId>) -> MessageView<'a> {
    if message.is_system() {
        return MessageView::Announcement(message);
    }

    MessageView::Bubble {
        message,
        sender: find_sender(roster, message.sender),
        own: is_own(message, current),
    }
}

#[cfg(test)]
mod tests {
    use crate::chat::{AVATARS, COLORS};

    use super::*;

    #[test]
    fn split_keeps_insertion_order() {
        let mut roster: Vec<User> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| User::new(name, AVATARS[0], COLORS[0]))
            .collect();
        roster[1].status = Status::Offline;

        let split = split_roster(&roster);
        let online: Vec<_> = split.online.iter().map(|u| u.nickname.as_str()).collect();
        let offline: Vec<_> = split.offline.iter().map(|u| u.nickname.as_str()).collect();

        assert_eq!(online, ["a", "c", "d"]);
        assert_eq!(offline, ["b"]);
    }

    #[test]
    fn unknown_sender_renders_as_anonymous_bubble() {
        let roster = vec![User::new("Alice", AVATARS[0], COLORS[0])];
        let stray = Message::new(Sender::User(UserId::new()), "who am i");

        match message_view(&stray, &roster, Some(roster[0].id)) {
            MessageView::Bubble { sender, own, .. } => {
                assert!(sender.is_none());
                assert!(!own);
            }
            MessageView::Announcement(_) => panic!("user message rendered as announcement"),
        }
    }

    #[test]
    fn system_messages_are_announcements() {
        let message = Message::new(Sender::System, "Alice joined the chat! 👋");
        assert!(matches!(message_view(&message, &[], None), MessageView::Announcement(_)));
        assert!(find_sender(&[], Sender::System).is_none());
    }

    #[test]
    fn own_messages_are_detected() {
        let alice = User::new("Alice", AVATARS[0], COLORS[0]);
        let roster = vec![alice.clone()];
        let message = Message::new(Sender::User(alice.id), "hi");

        match message_view(&message, &roster, Some(alice.id)) {
            MessageView::Bubble { sender, own, .. } => {
                assert_eq!(sender, Some(&alice));
                assert!(own);
            }
            MessageView::Announcement(_) => panic!("expected a bubble"),
        }
    }

    #[test]
    fn status_line_falls_back_to_presence() {
        let mut user = User::new("Alice", AVATARS[0], COLORS[0]);
        assert_eq!(status_line(&user), "Online");
        user.custom_status = "brb".to_owned();
        assert_eq!(status_line(&user), "brb");
        user.custom_status.clear();
        user.status = Status::Offline;
        assert_eq!(status_line(&user), "Offline");
    }
}
