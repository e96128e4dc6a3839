use dioxus::prelude::*;
use shared_types::{AuthUser, UserRole};

/// Global authentication state provided at the app root.
/// Owned by the identity flow (session restore, login, logout); pages read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Effective role of the current visitor. Signed-out visitors are `Guest`.
pub fn use_user_role() -> UserRole {
    let auth = use_auth();
    let binding = auth.current_user.read();
    binding
        .as_ref()
        .map(|u| UserRole::from_str_or_default(&u.role))
        .unwrap_or_default()
}
