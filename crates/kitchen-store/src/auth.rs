//! # Mock Authentication
//!
//! A fixed directory of users and a single shared demo password. This is
//! the development sign-in for environments without a credential store;
//! real password hashing and session management are out of scope for this
//! layer and slot in behind the same [`authenticate`] signature.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  authenticate(email, password)                                  │
//! │       │                                                         │
//! │       ├── email in directory AND password == "password"         │
//! │       │        └──► Ok(User)   (role + branch scope attached)   │
//! │       │                                                         │
//! │       └── anything else                                         │
//! │                └──► Err(InvalidCredentials)                     │
//! │                     (same error for bad email and bad password) │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use kitchen_core::{CoreError, CoreResult, Role, User};

use crate::fixtures;

/// The demo password accepted for every directory user.
const DEMO_PASSWORD: &str = "password";

/// The fixed user directory: one main manager plus one manager per
/// seeded branch.
pub fn directory() -> Vec<User> {
    vec![
        User {
            id: "u-main".to_string(),
            name: "Sarah Mitchell".to_string(),
            email: "admin@kitchenhub.com".to_string(),
            role: Role::MainManager,
            branch_id: None,
        },
        User {
            id: "u-olaya".to_string(),
            name: "Omar Haddad".to_string(),
            email: "olaya@kitchenhub.com".to_string(),
            role: Role::BranchManager,
            branch_id: Some(fixtures::BRANCH_OLAYA.to_string()),
        },
        User {
            id: "u-hamra".to_string(),
            name: "Lina Khoury".to_string(),
            email: "hamra@kitchenhub.com".to_string(),
            role: Role::BranchManager,
            branch_id: Some(fixtures::BRANCH_HAMRA.to_string()),
        },
        User {
            id: "u-laban".to_string(),
            name: "Yousef Nasser".to_string(),
            email: "laban@kitchenhub.com".to_string(),
            role: Role::BranchManager,
            branch_id: Some(fixtures::BRANCH_LABAN.to_string()),
        },
    ]
}

/// Checks a credential pair against the directory.
///
/// Unknown email and wrong password produce the same error, so callers
/// cannot probe which emails exist.
pub fn authenticate(email: &str, password: &str) -> CoreResult<User> {
    let user = directory()
        .into_iter()
        .find(|u| u.email == email)
        .filter(|_| password == DEMO_PASSWORD)
        .ok_or(CoreError::InvalidCredentials);
    match &user {
        Ok(u) => info!(user_id = %u.id, role = ?u.role, "sign-in succeeded"),
        Err(_) => warn!(email, "sign-in rejected"),
    }
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials_attach_role_and_scope() {
        let admin = authenticate("admin@kitchenhub.com", "password").unwrap();
        assert_eq!(admin.role, Role::MainManager);
        assert_eq!(admin.branch_id, None);

        let branch = authenticate("olaya@kitchenhub.com", "password").unwrap();
        assert_eq!(branch.role, Role::BranchManager);
        assert_eq!(branch.branch_id.as_deref(), Some(fixtures::BRANCH_OLAYA));
    }

    #[test]
    fn test_bad_password_and_unknown_email_fail_alike() {
        let bad_password = authenticate("admin@kitchenhub.com", "hunter2").unwrap_err();
        let bad_email = authenticate("nobody@kitchenhub.com", "password").unwrap_err();
        assert!(matches!(bad_password, CoreError::InvalidCredentials));
        assert!(matches!(bad_email, CoreError::InvalidCredentials));
    }
}
