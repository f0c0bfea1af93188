//! Current shopper identity.
//!
//! No credentials are checked here. The role arrives with the identity and is
//! trusted as given; gating admin operations is the router's job.

use common::UserId;
use serde::{Deserialize, Serialize};

/// Display name attributed to orders placed without a session.
pub const GUEST_NAME: &str = "Guest Customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            avatar: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replaces whoever was logged in.
    pub fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// The id and display name orders are attributed to.
    pub fn customer(&self) -> (UserId, String) {
        match &self.user {
            Some(user) => (user.id.clone(), user.name.clone()),
            None => (UserId::guest(), GUEST_NAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_attributes_to_guest() {
        let session = Session::anonymous();
        let (id, name) = session.customer();
        assert!(id.is_guest());
        assert_eq!(name, GUEST_NAME);
        assert!(!session.is_admin());
    }

    #[test]
    fn login_replaces_and_logout_clears() {
        let mut session = Session::anonymous();
        session.login(User::new("user_1", "Mohamed Ali", "mo@example.com", Role::User));
        session.login(User::new("admin_1", "Admin User", "admin@example.com", Role::Admin));

        assert!(session.is_admin());
        assert_eq!(session.customer().0.as_str(), "admin_1");

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn role_is_taken_as_given() {
        let mut session = Session::anonymous();
        session.login(User::new("u", "Root", "admin@shop.so", Role::User));
        assert!(!session.is_admin());
    }
}
