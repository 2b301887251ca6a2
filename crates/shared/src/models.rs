use serde::{Deserialize, Serialize};

/// Speaker role, serialized lowercase and forwarded verbatim to the chat
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Developer,
    System,
}

/// One conversation turn entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn developer(content: impl Into<String>) -> Self {
        Self::new(Role::Developer, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// One entry from a news feed. Feeds are inconsistent about which elements
/// they fill in, so every field is defaultable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::developer("Answer in Korean");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "developer");
        assert_eq!(json["content"], "Answer in Korean");
    }

    #[test]
    fn test_news_item_fields_default() {
        let item: NewsItem = serde_json::from_str("{\"title\": \"only a title\"}").unwrap();
        assert_eq!(item.title, "only a title");
        assert!(item.link.is_empty());
        assert!(item.summary.is_empty());
        assert!(item.published.is_empty());
        assert!(item.source.is_empty());
    }
}
