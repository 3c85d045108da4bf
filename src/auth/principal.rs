#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// What the admin view knows about the current operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unknown,
    Unauthenticated,
    AuthenticatedNonAdmin,
    AuthenticatedAdmin,
}

impl AuthState {
    pub fn signed_in(is_admin: bool) -> Self {
        if is_admin {
            Self::AuthenticatedAdmin
        } else {
            Self::AuthenticatedNonAdmin
        }
    }
}
