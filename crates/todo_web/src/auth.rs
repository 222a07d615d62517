/// Decides whether a submitted username/password pair may log in.
///
/// The web layer only consults this trait; plugging in a real identity
/// provider means supplying another implementation to [`crate::AppState`].
pub trait Authenticator: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Stand-in check: any non-empty username whose password is the same string.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderAuthenticator;

impl Authenticator for PlaceholderAuthenticator {
    fn verify(&self, username: &str, password: &str) -> bool {
        !username.is_empty() && username == password
    }
}
