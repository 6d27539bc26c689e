use serde::Deserialize;

use super::{User, AVATARS, COLORS, CUSTOM_STATUS_MAX, MESSAGE_MAX, NICKNAME_MAX};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("nickname is required")]
    EmptyNickname,
    #[error("nickname is longer than {} characters", NICKNAME_MAX)]
    NicknameTooLong,
    #[error("{0} is not one of the offered avatars")]
    UnknownAvatar(String),
    #[error("{0} is not one of the offered colors")]
    UnknownColor(String),
    #[error("message is empty")]
    EmptyMessage,
    #[error("message is longer than {} characters", MESSAGE_MAX)]
    MessageTooLong,
    #[error("custom status is longer than {} characters", CUSTOM_STATUS_MAX)]
    CustomStatusTooLong,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub nickname: String,
    pub avatar: String,
    pub color: String,
}

impl RegistrationForm {
    pub fn into_user(self) -> Result<User, FormError> {
        let nickname = self.nickname.trim();
        if nickname.is_empty() {
            return Err(FormError::EmptyNickname);
        }
        if nickname.chars().count() > NICKNAME_MAX {
            return Err(FormError::NicknameTooLong);
        }
        if !AVATARS.contains(&self.avatar.as_str()) {
            return Err(FormError::UnknownAvatar(self.avatar));
        }
        if !COLORS.contains(&self.color.as_str()) {
            return Err(FormError::UnknownColor(self.color));
        }

        Ok(User::new(nickname, &self.avatar, &self.color))
    }
}

#[derive(Debug, Deserialize)]
pub struct ComposerForm {
    pub text: String,
}

impl ComposerForm {
    /// The text is kept as typed; only the blank check looks at it trimmed.
    pub fn validate(&self) -> Result<&str, FormError> {
        if self.text.trim().is_empty() {
            return Err(FormError::EmptyMessage);
        }
        if self.text.chars().count() > MESSAGE_MAX {
            return Err(FormError::MessageTooLong);
        }
        Ok(&self.text)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub profile_link: String,
    #[serde(default)]
    pub custom_status: String,
}

impl ProfileForm {
    /// Builds the edited user. Fields the editor does not show come from `current`.
    pub fn apply(self, current: &User) -> Result<User, FormError> {
        let custom_status = self.custom_status.trim();
        if custom_status.chars().count() > CUSTOM_STATUS_MAX {
            return Err(FormError::CustomStatusTooLong);
        }

        Ok(User {
            profile_link: self.profile_link.trim().to_owned(),
            custom_status: custom_status.to_owned(),
            ..current.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(nickname: &str) -> RegistrationForm {
        RegistrationForm {
            nickname: nickname.to_owned(),
            avatar: AVATARS[4].to_owned(),
            color: COLORS[4].to_owned(),
        }
    }

    #[test]
    fn registration_trims_nickname() {
        let user = registration("  Alice ").into_user().unwrap();
        assert_eq!(user.nickname, "Alice");
        assert_eq!(user.avatar, AVATARS[4]);
        assert_eq!(user.color, COLORS[4]);
        assert_eq!(user.profile_link, "@alice");
    }

    #[test]
    fn registration_rejects_bad_input() {
        assert_eq!(registration("   ").into_user(), Err(FormError::EmptyNickname));
        assert_eq!(registration(&"x".repeat(21)).into_user(), Err(FormError::NicknameTooLong));
        assert!(registration(&"é".repeat(20)).into_user().is_ok());

        let mut form = registration("Alice");
        form.avatar = "🐍".to_owned();
        assert_eq!(form.into_user(), Err(FormError::UnknownAvatar("🐍".to_owned())));

        let mut form = registration("Alice");
        form.color = "#000000".to_owned();
        assert_eq!(form.into_user(), Err(FormError::UnknownColor("#000000".to_owned())));
    }

    #[test]
    fn composer_limits() {
        let form = |text: &str| ComposerForm { text: text.to_owned() };
        assert_eq!(form(" \t").validate(), Err(FormError::EmptyMessage));
        assert_eq!(form(&"a".repeat(501)).validate(), Err(FormError::MessageTooLong));
        assert_eq!(form(" hi ").validate(), Ok(" hi "));
    }

    #[test]
    fn profile_edit_carries_hidden_fields() {
        let current = registration("Alice").into_user().unwrap();
        let edited = ProfileForm {
            profile_link: " @alice_w ".to_owned(),
            custom_status: "busy".to_owned(),
        }
        .apply(&current)
        .unwrap();

        assert_eq!(edited.profile_link, "@alice_w");
        assert_eq!(edited.custom_status, "busy");
        assert_eq!(edited.id, current.id);
        assert_eq!(edited.nickname, current.nickname);
        assert_eq!(edited.avatar, current.avatar);
        assert_eq!(edited.color, current.color);
        assert_eq!(edited.status, current.status);
    }

    #[test]
    fn profile_edit_rejects_long_status() {
        let current = registration("Alice").into_user().unwrap();
        let form = ProfileForm {
            custom_status: "z".repeat(51),
            ..Default::default()
        };
        assert_eq!(form.apply(&current), Err(FormError::CustomStatusTooLong));
    }
}
