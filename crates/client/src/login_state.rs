//! Login and role flags derived from the stored session.

use tomato_mall_core::{AccountId, Role};

use crate::session::{Session, SessionError};

/// Snapshot of who is logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginState {
    pub is_login: bool,
    pub is_admin: bool,
    pub is_shop_owner: bool,
    pub is_staff: bool,
    pub is_customer: bool,
    pub role: Option<Role>,
    pub account_id: Option<AccountId>,
}

impl LoginState {
    /// Logged-out state.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            is_login: false,
            is_admin: false,
            is_shop_owner: false,
            is_staff: false,
            is_customer: false,
            role: None,
            account_id: None,
        }
    }

    /// Derive flags from a login status and role.
    #[must_use]
    pub fn from_parts(is_login: bool, role: Option<Role>, account_id: Option<AccountId>) -> Self {
        Self {
            is_login,
            is_admin: role == Some(Role::Admin),
            is_shop_owner: role == Some(Role::Shopkeeper),
            is_staff: role == Some(Role::Staff),
            is_customer: role == Some(Role::Customer),
            role,
            account_id,
        }
    }

    /// Read the current state from a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn from_session(session: &Session) -> Result<Self, SessionError> {
        Ok(Self::from_parts(
            session.token()?.is_some(),
            session.role()?,
            session.account_id()?,
        ))
    }

    /// Whether the current role is one of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|role| roles.contains(&role))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_for_each_role() {
        let cases = [
            (Role::Admin, (true, false, false, false)),
            (Role::Shopkeeper, (false, true, false, false)),
            (Role::Staff, (false, false, true, false)),
            (Role::Customer, (false, false, false, true)),
        ];
        for (role, (admin, owner, staff, customer)) in cases {
            let state = LoginState::from_parts(true, Some(role), None);
            assert_eq!(state.is_admin, admin, "{role}");
            assert_eq!(state.is_shop_owner, owner, "{role}");
            assert_eq!(state.is_staff, staff, "{role}");
            assert_eq!(state.is_customer, customer, "{role}");
        }
    }

    #[test]
    fn test_from_session() {
        let session = Session::in_memory();
        assert_eq!(LoginState::from_session(&session).unwrap(), LoginState::anonymous());

        session
            .establish("tok", Role::Staff, AccountId::new(12))
            .unwrap();
        let state = LoginState::from_session(&session).unwrap();
        assert!(state.is_login);
        assert!(state.is_staff);
        assert_eq!(state.account_id, Some(AccountId::new(12)));
        assert!(state.has_any_role(&[Role::Admin, Role::Staff]));
        assert!(!state.has_any_role(&[Role::Customer]));
    }

    #[test]
    fn test_role_without_token_is_not_logged_in() {
        let session = Session::in_memory();
        session.store().set("role", "admin").unwrap();
        let state = LoginState::from_session(&session).unwrap();
        assert!(!state.is_login);
        assert!(state.is_admin);
    }
}
