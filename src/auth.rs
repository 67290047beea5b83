use std::fmt;

/// Jira API token.
///
/// Wrapped so it never ends up in logs through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Basic-auth credentials for Jira Cloud/Server (user e-mail + API token).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub token: Token,
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: Token) -> Self {
        Self {
            user: user.into(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let credentials = Credentials::new("me@example.com", Token::from("secret-token"));
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn token_round_trips_value() {
        assert_eq!(Token::from("abc").as_str(), "abc");
        assert_eq!(Token::from("abc".to_string()), Token::from("abc"));
    }
}
