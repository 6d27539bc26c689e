//! Locally simulated participants. They only act when a request asks them to.

use rand::{seq::IndexedRandom, Rng};

use super::{
    store::{ChatEvent, SessionStore},
    User, AVATARS, COLORS,
};

const ADJECTIVES: [&str; 25] = [
    "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
    "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy", "Sad",
    "Eager", "Fancy", "Rusty", "Golden", "Silver", "Bright", "Dark", "Lucky",
];

const NOUNS: [&str; 24] = [
    "Fox", "Bear", "Eagle", "Wolf", "Dragon", "Tiger", "Lion", "Owl", "Rabbit",
    "Falcon", "Hawk", "Shark", "Panda", "Kitten", "Puppy", "Phoenix", "Griffin",
    "Unicorn", "Turtle", "Dolphin", "Whale", "Elephant", "Giraffe", "Zebra",
];

const LINES: [&str; 10] = [
    "hey everyone!",
    "what did I miss?",
    "haha, good one",
    "totally agree",
    "hmm, not sure about that",
    "brb, getting coffee",
    "that's **wild**",
    "anyone else here from the morning crowd?",
    "🔥🔥🔥",
    "tell me more",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub fn invent_guest<R: Rng + ?Sized>(rng: &mut R) -> User {
    let nickname = format!("{} {}", pick(rng, &ADJECTIVES), pick(rng, &NOUNS));
    User::new(&nickname, pick(rng, &AVATARS), pick(rng, &COLORS))
}

/// A random participant other than the current identity says something.
pub fn reply<R: Rng + ?Sized>(store: &mut SessionStore, rng: &mut R) -> Option<ChatEvent> {
    let current = store.current_id();
    let others: Vec<_> = store
        .roster()
        .iter()
        .filter(|user| Some(user.id) != current)
        .map(|user| user.id)
        .collect();

    let guest = *others.choose(rng)?;
    let line = pick(rng, &LINES);
    store.post_as(guest, line)
}
