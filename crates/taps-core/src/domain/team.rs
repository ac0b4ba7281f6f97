use serde::{Deserialize, Serialize};

/// Team entity - the principal an API token resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub token: String,
}

impl Team {
    pub fn new(id: i32, name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            token: token.into(),
        }
    }
}

/// Mask an API token for logging: keeps the first four characters.
pub fn mask_token(token: &str) -> String {
    match token.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &token[..idx]),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdef123"), "abcd***");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("abcd"), "***");
    }
}
