//! User-facing message tables.

use std::fmt;
use std::str::FromStr;

use crate::error::FailureKind;

/// Language for progress and failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => f.write_str("en"),
            Locale::Chinese => f.write_str("zh"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "zh" | "zh-cn" | "chinese" => Ok(Locale::Chinese),
            _ => Err(format!("Invalid locale: {}. Use 'en' or 'zh'", s)),
        }
    }
}

impl Locale {
    pub fn preparing(&self) -> String {
        match self {
            Locale::English => "Preparing prompt...".to_string(),
            Locale::Chinese => "正在准备提示词...".to_string(),
        }
    }

    pub fn generating(&self, provider: &str, card_count: u32) -> String {
        match self {
            Locale::English => format!("Generating {} cards with {}...", card_count, provider),
            Locale::Chinese => format!("正在使用 {} 生成 {} 张卡片...", provider, card_count),
        }
    }

    pub fn parsing(&self) -> String {
        match self {
            Locale::English => "Parsing response...".to_string(),
            Locale::Chinese => "正在解析响应...".to_string(),
        }
    }

    pub fn completed(&self, card_count: usize) -> String {
        match self {
            Locale::English => format!("Generated {} cards", card_count),
            Locale::Chinese => format!("已生成 {} 张卡片", card_count),
        }
    }

    pub fn failed(&self) -> String {
        match self {
            Locale::English => "Generation failed".to_string(),
            Locale::Chinese => "生成失败".to_string(),
        }
    }

    /// Message for a classified failure.
    pub fn failure(&self, provider: &str, kind: &FailureKind) -> String {
        match (self, kind) {
            (Locale::English, FailureKind::InvalidApiKey) => {
                format!("Invalid {} API key. Please check your settings.", provider)
            }
            (Locale::English, FailureKind::RateLimited) => {
                format!("{} rate limit exceeded. Please try again later.", provider)
            }
            (Locale::English, FailureKind::QuotaExceeded) => {
                format!("{} quota exhausted. Please check your account balance.", provider)
            }
            (Locale::English, FailureKind::Timeout) => {
                format!("{} request timed out. Please try again.", provider)
            }
            (Locale::English, FailureKind::Other(message)) => {
                format!("{} API error: {}", provider, message)
            }
            (Locale::English, FailureKind::Unknown) => {
                format!("{} failed to generate cards.", provider)
            }
            (Locale::Chinese, FailureKind::InvalidApiKey) => {
                format!("{} API 密钥无效，请检查设置。", provider)
            }
            (Locale::Chinese, FailureKind::RateLimited) => {
                format!("{} 请求频率超限，请稍后再试。", provider)
            }
            (Locale::Chinese, FailureKind::QuotaExceeded) => {
                format!("{} 额度已用尽，请检查账户余额。", provider)
            }
            (Locale::Chinese, FailureKind::Timeout) => {
                format!("{} 请求超时，请重试。", provider)
            }
            (Locale::Chinese, FailureKind::Other(message)) => {
                format!("{} API 错误：{}", provider, message)
            }
            (Locale::Chinese, FailureKind::Unknown) => {
                format!("{} 生成卡片失败。", provider)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_embed_raw_text() {
        let kind = FailureKind::Other("boom".to_string());
        assert_eq!(
            Locale::English.failure("DeepSeek", &kind),
            "DeepSeek API error: boom"
        );
        assert!(Locale::Chinese.failure("DeepSeek", &kind).contains("boom"));
    }

    #[test]
    fn test_generating_mentions_count() {
        assert!(Locale::English.generating("DeepSeek", 7).contains('7'));
        assert!(Locale::Chinese.generating("DeepSeek", 7).contains('7'));
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("zh".parse::<Locale>(), Ok(Locale::Chinese));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::English));
        assert!("fr".parse::<Locale>().is_err());
    }
}
