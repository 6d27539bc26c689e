use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{Event, Options, Parser, Tag};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::chat::{
    store::SessionStore,
    view::{message_view, split_roster, status_line, MessageView},
    Status, User, UserId, AVATARS, COLORS, CUSTOM_STATUS_MAX, MESSAGE_MAX, NICKNAME_MAX,
};

fn page(heading: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (heading) }
                link rel="stylesheet" href="/static/chat.css";
            }
            body { (body) }
        }
    }
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("javascript:") || url.starts_with("data:") || url.starts_with("vbscript:")
}

/// Message text as markdown. Raw HTML in the source is shown as text.
pub fn markdown(text: &str) -> PreEscaped<String> {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if is_script_url(&dest_url) => {
            Event::Start(Tag::Link { link_type, dest_url: "#".into(), title, id })
        }
        _ => event,
    });

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    PreEscaped(html_output)
}

/// UTC `HH:MM`; the page script rewrites it in the reader's local time.
fn clock(timestamp: OffsetDateTime) -> Markup {
    let datetime = timestamp.format(&Rfc3339).unwrap_or_default();
    html! {
        time datetime=(datetime) { (format!("{:02}:{:02}", timestamp.hour(), timestamp.minute())) }
    }
}

fn avatar(user: &User, class: &str) -> Markup {
    html! {
        span class=(class) style={ "background-color: " (user.color) } { (user.avatar) }
    }
}

pub fn registration_page(error: Option<&str>) -> Markup {
    page("Join the chat", html! {
        main.card {
            h1 { "Welcome to the chat!" }
            p.muted { "Create your profile and start talking" }
            @if let Some(error) = error {
                p.error { (error) }
            }
            form method="post" action="/register" {
                label for="nickname" { "Your nickname" }
                input #nickname type="text" name="nickname" maxlength=(NICKNAME_MAX)
                    placeholder="Enter a nickname..." autocomplete="off" required;

                fieldset.avatars {
                    legend { "Pick an avatar" }
                    @for (i, glyph) in AVATARS.iter().enumerate() {
                        label.choice {
                            input type="radio" name="avatar" value=(glyph) checked[i == 0];
                            span { (glyph) }
                        }
                    }
                }

                fieldset.colors {
                    legend { "Pick a profile color" }
                    @for (i, color) in COLORS.iter().enumerate() {
                        label.choice {
                            input type="radio" name="color" value=(color) checked[i == 0];
                            span.swatch style={ "background-color: " (color) } {}
                        }
                    }
                }

                button #join type="submit" { "Start chatting" }
            }
        }
    })
}

fn roster_row(user: &User, current: Option<UserId>) -> Markup {
    let is_you = Some(user.id) == current;
    html! {
        div.user.you[is_you] {
            (avatar(user, "avatar"))
            span.dot.online[user.status == Status::Online] {}
            div {
                p.name {
                    (user.nickname)
                    @if is_you {
                        " " span.you-tag { "(you)" }
                    }
                }
                p.status { (status_line(user)) }
            }
        }
    }
}

pub fn roster_panel(roster: &[User], current: Option<UserId>) -> Markup {
    let split = split_roster(roster);
    html! {
        div.roster-head {
            h2 { "Participants" }
            p.muted { (split.online.len()) " online • " (roster.len()) " total" }
        }
        @if !split.online.is_empty() {
            h3 { "Online — " (split.online.len()) }
            @for user in &split.online {
                (roster_row(user, current))
            }
        }
        @if !split.offline.is_empty() {
            hr;
            h3 { "Offline — " (split.offline.len()) }
            @for user in &split.offline {
                (roster_row(user, current))
            }
        }
    }
}

pub fn message_item(view: MessageView<'_>) -> Markup {
    match view {
        MessageView::Announcement(message) => html! {
            div.announcement { (message.text) }
        },
        MessageView::Bubble { message, sender, own } => html! {
            div.message.own[own] {
                @if !own {
                    @if let Some(user) = sender {
                        (avatar(user, "avatar"))
                    }
                }
                div.body {
                    @if !own {
                        @if let Some(user) = sender {
                            p.sender style={ "color: " (user.color) } { (user.nickname) }
                        }
                    }
                    div.bubble { (markdown(&message.text)) }
                    p.time { (clock(message.timestamp)) }
                }
            }
        },
    }
}

pub fn room_page(store: &SessionStore, me: &User, error: Option<&str>) -> Markup {
    let roster = store.roster();
    page("Common room", html! {
        div.room {
            aside #roster { (roster_panel(roster, Some(me.id))) }
            section.chat {
                header.topbar {
                    h1 { "Common room" }
                    form method="post" action="/guests" {
                        button.ghost type="submit" { "Invite a guest" }
                    }
                    a.me href="/profile" title="Edit profile" { (avatar(me, "avatar big")) }
                }
                div #messages {
                    @for message in store.messages() {
                        (message_item(message_view(message, roster, Some(me.id))))
                    }
                }
                @if let Some(error) = error {
                    p.error.composer-error { (error) }
                }
                form #composer method="post" action="/send" {
                    input #text type="text" name="text" maxlength=(MESSAGE_MAX)
                        placeholder="Write a message..." autocomplete="off";
                    button #send type="submit" { "Send" }
                }
            }
        }
        script src="/static/chat.js" {}
    })
}

pub fn profile_page(user: &User, error: Option<&str>) -> Markup {
    page("Profile", html! {
        main.card {
            div.profile-head {
                (avatar(user, "avatar huge"))
                h2 { (user.nickname) }
                p.muted { "ID: " (user.id.short()) }
            }
            @if let Some(error) = error {
                p.error { (error) }
            }
            form method="post" action="/profile" {
                label for="profile_link" { "Profile link" }
                input #profile_link type="text" name="profile_link" value=(user.profile_link)
                    placeholder="@nickname";

                label for="custom_status" { "Custom status" }
                input #custom_status type="text" name="custom_status" value=(user.custom_status)
                    maxlength=(CUSTOM_STATUS_MAX) placeholder="Tell people about yourself...";

                button type="submit" { "Save changes" }
                a.button.ghost href="/" { "Cancel" }
            }
            dl.facts {
                dt { "Status:" }
                dd {
                    @match user.status {
                        Status::Online => { "Online" }
                        Status::Offline => { "Offline" }
                    }
                }
                dt { "Profile color:" }
                dd { span.swatch style={ "background-color: " (user.color) } {} }
            }
        }
    })
}
