//! # Session
//!
//! Who is signed in, if anyone.

use crate::types::User;

/// The current user. `None` means a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new(user: Option<User>) -> Self {
        Session { user }
    }

    /// Signs a user in (`Some`) or out (`None`).
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_sign_in_and_out() {
        let mut session = Session::default();
        assert!(session.current_user().is_none());
        assert!(!session.is_admin());

        let admin = User::demo(Role::Admin);
        session.set_user(Some(admin.clone()));
        assert_eq!(session.current_user(), Some(&admin));
        assert!(session.is_admin());

        session.set_user(None);
        assert!(!session.is_signed_in());
    }
}
