mod token;

pub use token::Token;

/// Username and token pair sent as HTTP basic auth.
pub struct BasicCredentials {
    pub username: String,
    pub token: Token,
}

impl BasicCredentials {
    pub fn new(username: &str, token: Token) -> Self {
        Self {
            username: username.to_owned(),
            token,
        }
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("token", &self.token)
            .finish()
    }
}
