use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::models::{Message, NewsItem};

/// Opening assistant message seeded into every fresh conversation.
pub const GREETING: &str = "챗봇이 무엇을 도와드릴까요?";

struct CacheEntry {
    items: Vec<NewsItem>,
    fetched_at: DateTime<Utc>,
}

/// Conversation history plus the per-category news cache. One session per
/// user; the orchestrator owns it outright, so there is no interior locking.
pub struct Session {
    pub messages: Vec<Message>,
    news_cache: HashMap<String, CacheEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            news_cache: HashMap::new(),
        }
    }

    /// Drop the history and reseed the greeting. The news cache survives a
    /// conversation reset.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::assistant(GREETING));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Cached items for `category`, provided the entry is strictly younger
    /// than `ttl`. `now` is passed in so the rule stays testable without a
    /// real clock.
    pub fn cached_news(
        &self,
        category: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Option<&[NewsItem]> {
        self.news_cache
            .get(category)
            .filter(|entry| now - entry.fetched_at < ttl)
            .map(|entry| entry.items.as_slice())
    }

    /// Store freshly fetched items for a category, replacing any previous
    /// entry.
    pub fn store_news(
        &mut self,
        category: impl Into<String>,
        items: Vec<NewsItem>,
        now: DateTime<Utc>,
    ) {
        self.news_cache.insert(
            category.into(),
            CacheEntry {
                items,
                fetched_at: now,
            },
        );
    }

    /// Drop every cached category so the next read refetches.
    pub fn clear_news_cache(&mut self) {
        self.news_cache.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
