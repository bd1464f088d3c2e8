//! Audio Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 公开分享令牌
///
/// 64 位十六进制随机串，作为无需登录访问音频的凭据
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareToken(String);

impl ShareToken {
    /// 生成新令牌（两个 v4 UUID 拼接，共 64 个十六进制字符）
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }

    /// 从已存储的字符串还原
    pub fn from_string(token: impl Into<String>) -> Result<Self, &'static str> {
        let token = token.into();
        if token.len() != 64 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("share token must be 64 hex characters");
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_shape() {
        let token = ShareToken::generate();
        assert_eq!(token.as_str().len(), 64);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(ShareToken::generate(), ShareToken::generate());
    }

    #[test]
    fn test_from_string_validates() {
        let token = ShareToken::generate();
        assert!(ShareToken::from_string(token.as_str()).is_ok());
        assert!(ShareToken::from_string("short").is_err());
        assert!(ShareToken::from_string("g".repeat(64)).is_err());
    }
}
