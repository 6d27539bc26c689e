//! Desktop notifications for activity the user did not cause.
//!
//! The page owns the actual platform API. This module decides *whether* to
//! show something: permission is asked for at most once per page load, and
//! nothing is shown while the page is in front of the user.

use serde::{Deserialize, Serialize};

use crate::chat::{
    store::ChatEvent,
    view::find_sender,
    Sender, User, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tag: &'static str,
}

/// In-page popup. Unlike [`Notification`] it is shown whether or not the page is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub body: String,
}

/// The platform side of notifications.
pub trait Notifier {
    fn document_hidden(&self) -> bool;
    fn show(&self, notification: Notification);
}

/// Returned by [`NotificationGate::init`] when the page has to ask the user.
#[derive(Debug, PartialEq, Eq)]
pub struct PermissionRequest;

#[derive(Debug)]
pub struct NotificationGate {
    granted: bool,
    pending: bool,
}

impl NotificationGate {
    pub fn init(permission: Permission) -> (Self, Option<PermissionRequest>) {
        match permission {
            Permission::Granted => (NotificationGate { granted: true, pending: false }, None),
            Permission::Denied => (NotificationGate { granted: false, pending: false }, None),
            Permission::Default => (
                NotificationGate { granted: false, pending: true },
                Some(PermissionRequest),
            ),
        }
    }

    /// Records the answer to the one outstanding request.
    pub fn resolve(&mut self, outcome: Permission) {
        if !self.pending {
            return;
        }
        self.pending = false;
        self.granted = outcome == Permission::Granted;
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    pub fn notify<N: Notifier>(&self, notifier: &N, notification: Notification) -> bool {
        if !self.granted || !notifier.document_hidden() {
            return false;
        }
        notifier.show(notification);
        true
    }
}

/// Turns a store event into a notification, if it is about somebody else.
pub fn alert_for(event: &ChatEvent, current: Option<UserId>, roster: &[User]) -> Option<Notification> {
    match event {
        ChatEvent::MessageAdded(message) => {
            let Sender::User(id) = message.sender else {
                return None;
            };
            if Some(id) == current {
                return None;
            }

            let title = find_sender(roster, message.sender)
                .map(|user| user.nickname.clone())
                .unwrap_or_else(|| "Someone".to_owned());

            Some(Notification {
                title,
                body: message.text.clone(),
                tag: "new-message",
            })
        }
        ChatEvent::Joined(user) if Some(user.id) != current => Some(Notification {
            title: format!("{} {} joined!", user.avatar, user.nickname),
            body: "New participant in the chat".to_owned(),
            tag: "user-joined",
        }),
        ChatEvent::Joined(_) | ChatEvent::ProfileUpdated(_) => None,
    }
}

/// Same trigger as [`alert_for`]; message toasts lead with the sender's avatar.
pub fn toast_for(event: &ChatEvent, current: Option<UserId>, roster: &[User]) -> Option<Toast> {
    let alert = alert_for(event, current, roster)?;

    let title = match event {
        ChatEvent::MessageAdded(message) => {
            let avatar = find_sender(roster, message.sender).map_or("💬", |user| user.avatar.as_str());
            format!("{avatar} {}", alert.title)
        }
        ChatEvent::Joined(_) | ChatEvent::ProfileUpdated(_) => alert.title,
    };

    Some(Toast { title, body: alert.body })
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use crate::chat::{store::SessionStore, Message, AVATARS, COLORS};

    use super::*;

    #[derive(Default)]
    struct FakePage {
        hidden: Cell<bool>,
        shown: RefCell<Vec<Notification>>,
    }

    impl Notifier for FakePage {
        fn document_hidden(&self) -> bool {
            self.hidden.get()
        }

        fn show(&self, notification: Notification) {
            self.shown.borrow_mut().push(notification);
        }
    }

    fn ping() -> Notification {
        Notification {
            title: "Bob".to_owned(),
            body: "ping".to_owned(),
            tag: "new-message",
        }
    }

    #[test]
    fn asks_only_when_undetermined() {
        assert_eq!(NotificationGate::init(Permission::Granted).1, None);
        assert_eq!(NotificationGate::init(Permission::Denied).1, None);
        assert_eq!(NotificationGate::init(Permission::Default).1, Some(PermissionRequest));
    }

    #[test]
    fn only_the_first_answer_counts() {
        let (mut gate, _) = NotificationGate::init(Permission::Default);
        assert!(!gate.is_granted());
        gate.resolve(Permission::Granted);
        assert!(gate.is_granted());
        gate.resolve(Permission::Denied);
        assert!(gate.is_granted());

        let (mut gate, _) = NotificationGate::init(Permission::Denied);
        gate.resolve(Permission::Granted);
        assert!(!gate.is_granted());
    }

    #[test]
    fn shows_only_when_granted_and_hidden() {
        let page = FakePage::default();
        let (granted, _) = NotificationGate::init(Permission::Granted);
        let (denied, _) = NotificationGate::init(Permission::Denied);

        assert!(!granted.notify(&page, ping()));
        page.hidden.set(true);
        assert!(!denied.notify(&page, ping()));
        assert!(granted.notify(&page, ping()));

        assert_eq!(page.shown.borrow().as_slice(), &[ping()]);
    }

    #[test]
    fn alerts_skip_own_and_system_activity() {
        let mut store = SessionStore::new();
        let alice = User::new("Alice", AVATARS[0], COLORS[0]);
        let bob = User::new("Bob", AVATARS[1], COLORS[1]);

        let own_join = store.register(alice.clone());
        for event in &own_join {
            assert_eq!(alert_for(event, store.current_id(), store.roster()), None);
        }

        let own = store.send("hi").unwrap();
        assert_eq!(alert_for(&own, store.current_id(), store.roster()), None);

        let joined = store.admit(bob.clone());
        let alert = alert_for(&joined[0], store.current_id(), store.roster()).unwrap();
        assert_eq!(alert.title, format!("{} Bob joined!", AVATARS[1]));
        assert_eq!(alert.tag, "user-joined");
        assert_eq!(alert_for(&joined[1], store.current_id(), store.roster()), None);

        let theirs = store.post_as(bob.id, "yo").unwrap();
        let alert = alert_for(&theirs, store.current_id(), store.roster()).unwrap();
        assert_eq!(alert.title, "Bob");
        assert_eq!(alert.body, "yo");
        assert_eq!(alert.tag, "new-message");
    }

    #[test]
    fn unknown_sender_gets_a_placeholder_title() {
        let stray = ChatEvent::MessageAdded(Message::new(Sender::User(UserId::new()), "boo"));
        let alert = alert_for(&stray, None, &[]).unwrap();
        assert_eq!(alert.title, "Someone");

        let toast = toast_for(&stray, None, &[]).unwrap();
        assert_eq!(toast.title, "💬 Someone");
        assert_eq!(toast.body, "boo");
    }

    #[test]
    fn toasts_follow_alerts() {
        let mut store = SessionStore::new();
        let alice = User::new("Alice", AVATARS[0], COLORS[0]);
        let bob = User::new("Bob", AVATARS[1], COLORS[1]);
        store.register(alice);

        let own = store.send("hi").unwrap();
        assert_eq!(toast_for(&own, store.current_id(), store.roster()), None);

        let joined = store.admit(bob.clone());
        let toast = toast_for(&joined[0], store.current_id(), store.roster()).unwrap();
        assert_eq!(toast.title, format!("{} Bob joined!", AVATARS[1]));
        assert_eq!(toast.body, "New participant in the chat");

        let theirs = store.post_as(bob.id, "yo").unwrap();
        let toast = toast_for(&theirs, store.current_id(), store.roster()).unwrap();
        assert_eq!(toast.title, format!("{} Bob", AVATARS[1]));
        assert_eq!(toast.body, "yo");
    }
}
