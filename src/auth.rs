use crate::model::{Role, User};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub fn digest_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Linear scan for an exact (email, password) pair.
pub fn authenticate<'a>(users: &'a [User], email: &str, password: &str) -> Option<&'a User> {
    let digest = digest_password(password);
    users
        .iter()
        .find(|u| u.email == email && u.password_digest == digest)
}

/// Which screen the shell is on and what it needs to render it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Landing,
    #[serde(rename_all = "camelCase")]
    AwaitingCredentials { role: Role },
    #[serde(rename_all = "camelCase")]
    Authenticated { user_id: String, role: Role },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("this email is registered as a {actual}, not a {expected}")]
    RoleMismatch { expected: Role, actual: Role },
    #[error("cannot {action} from the {from} view")]
    BadTransition {
        action: &'static str,
        from: &'static str,
    },
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::RoleMismatch { .. } => "role_mismatch",
            AuthError::BadTransition { .. } => "bad_view_transition",
        }
    }
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Landing => "landing",
            ViewState::AwaitingCredentials { .. } => "awaitingCredentials",
            ViewState::Authenticated { .. } => "authenticated",
        }
    }

    pub fn select_role(&self, role: Role) -> Result<ViewState, AuthError> {
        match self {
            ViewState::Landing | ViewState::AwaitingCredentials { .. } => {
                Ok(ViewState::AwaitingCredentials { role })
            }
            ViewState::Authenticated { .. } => Err(AuthError::BadTransition {
                action: "select a role",
                from: self.name(),
            }),
        }
    }

    pub fn back(&self) -> Result<ViewState, AuthError> {
        match self {
            ViewState::AwaitingCredentials { .. } => Ok(ViewState::Landing),
            _ => Err(AuthError::BadTransition {
                action: "go back",
                from: self.name(),
            }),
        }
    }

    /// Checks credentials against `users` for the role picked on the landing
    /// screen.
    pub fn login(
        &self,
        users: &[User],
        email: &str,
        password: &str,
    ) -> Result<ViewState, AuthError> {
        let ViewState::AwaitingCredentials { role } = self else {
            return Err(AuthError::BadTransition {
                action: "log in",
                from: self.name(),
            });
        };
        let user = authenticate(users, email, password).ok_or(AuthError::InvalidCredentials)?;
        if user.role != *role {
            return Err(AuthError::RoleMismatch {
                expected: *role,
                actual: user.role,
            });
        }
        Ok(ViewState::Authenticated {
            user_id: user.id.clone(),
            role: user.role,
        })
    }

    pub fn logout(&self) -> ViewState {
        ViewState::Landing
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            ViewState::Authenticated { user_id, .. } => Some(user_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    #[test]
    fn authenticate_requires_exact_pair() {
        let users = Seed::demo().users();
        let found = authenticate(&users, "sarah.smith@campus.edu", "demo123").expect("user");
        assert_eq!(found.id, "teacher1");
        assert!(authenticate(&users, "sarah.smith@campus.edu", "demo1234").is_none());
        assert!(authenticate(&users, "SARAH.SMITH@campus.edu", "demo123").is_none());
    }

    #[test]
    fn landing_to_dashboard_and_back() {
        let users = Seed::demo().users();
        let view = ViewState::default()
            .select_role(Role::Student)
            .expect("select");
        assert_eq!(view, ViewState::AwaitingCredentials { role: Role::Student });

        let view = view
            .login(&users, "alex.johnson@student.edu", "demo123")
            .expect("login");
        assert_eq!(view.user_id(), Some("student1"));

        assert_eq!(view.logout(), ViewState::Landing);
    }

    #[test]
    fn login_rejects_wrong_role_and_bad_password() {
        let users = Seed::demo().users();
        let view = ViewState::AwaitingCredentials { role: Role::Student };
        let err = view
            .login(&users, "michael.brown@campus.edu", "admin123")
            .expect_err("role mismatch");
        assert_eq!(err.code(), "role_mismatch");
        assert_eq!(
            err.to_string(),
            "this email is registered as a admin, not a student"
        );

        let err = view
            .login(&users, "alex.johnson@student.edu", "nope")
            .expect_err("bad password");
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn transitions_outside_their_view_are_rejected() {
        let users = Seed::demo().users();
        let err = ViewState::Landing
            .login(&users, "alex.johnson@student.edu", "demo123")
            .expect_err("no role selected");
        assert_eq!(err.code(), "bad_view_transition");

        let authed = ViewState::Authenticated {
            user_id: "student1".into(),
            role: Role::Student,
        };
        assert!(authed.select_role(Role::Admin).is_err());
        assert!(ViewState::Landing.back().is_err());
    }

    #[test]
    fn view_serializes_as_tagged_union() {
        let v = serde_json::to_value(ViewState::Authenticated {
            user_id: "u".into(),
            role: Role::Teacher,
        })
        .expect("serialize");
        assert_eq!(
            v,
            serde_json::json!({ "view": "authenticated", "userId": "u", "role": "teacher" })
        );
        assert_eq!(
            serde_json::to_value(ViewState::Landing).expect("serialize"),
            serde_json::json!({ "view": "landing" })
        );
    }
}
