use almacen_auth::AuthUser;

/// Authenticated caller for a request.
///
/// Inserted by the auth middleware; handlers only ever check that it is
/// present, they never branch on who the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    user: AuthUser,
}

impl CallerContext {
    pub fn new(user: AuthUser) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }
}
