use serde::{Deserialize, Serialize};
use services::{Actor, ActorType};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    /// `TRADER`, `EMPLOYEE` or `ADMIN`. Tokens without it belong to admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl Claims {
    /// Resolves the caller into an [`Actor`]. An unrecognised `user_type`
    /// yields `None` so guards can reject the token.
    pub fn actor(&self) -> Option<Actor> {
        let kind = match self.user_type.as_deref() {
            None => ActorType::Admin,
            Some(raw) => raw.parse::<ActorType>().ok()?,
        };

        Some(match kind {
            ActorType::Trader => Actor::Trader { id: self.sub },
            ActorType::Employee => Actor::Employee { id: self.sub },
            ActorType::Admin => Actor::Admin { id: Some(self.sub) },
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn actor(&self) -> Option<Actor> {
        self.0.actor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(user_type: Option<&str>) -> Claims {
        Claims {
            sub: 7,
            exp: 0,
            user_type: user_type.map(str::to_string),
        }
    }

    #[test]
    fn missing_user_type_is_admin() {
        assert_eq!(claims(None).actor(), Some(Actor::Admin { id: Some(7) }));
    }

    #[test]
    fn user_type_is_case_insensitive() {
        assert_eq!(claims(Some("trader")).actor(), Some(Actor::Trader { id: 7 }));
        assert_eq!(claims(Some("EMPLOYEE")).actor(), Some(Actor::Employee { id: 7 }));
    }

    #[test]
    fn unknown_user_type_has_no_actor() {
        assert_eq!(claims(Some("VENDOR")).actor(), None);
    }
}
