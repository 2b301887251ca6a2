use anyhow::Result;
use chrono::{Duration, Utc};

use crate::chat::ChatClient;
use crate::config::Config;
use crate::digest;
use crate::intent::Intent;
use crate::models::{Message, NewsItem};
use crate::news::NewsClient;
use crate::session::Session;

/// Persona sent as the fixed system message on every chat call.
const PERSONA: &str = "당신은 도움이 되는 어시스턴트입니다.";

/// Ties the classifier, feed client, chat client, and session together. One
/// instance per user session; it owns all of its state.
pub struct Assistant {
    config: Config,
    chat: ChatClient,
    news: NewsClient,
    pub session: Session,
    /// Category used for the news panel and as the search fallback feed.
    pub category: String,
    /// Sent with the developer role when non-empty.
    pub developer_instruction: String,
    /// Shown in the UI only; the chat call does not forward it.
    pub temperature: f32,
}

impl Assistant {
    pub fn new(config: Config) -> Result<Self> {
        let chat = ChatClient::new(&config)?;
        let news = NewsClient::new()?;
        Ok(Self {
            config,
            chat,
            news,
            session: Session::new(),
            category: NewsClient::default_category().to_string(),
            developer_instruction: String::new(),
            temperature: 0.7,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one conversation turn. Returns `None` for blank input, otherwise
    /// the assistant reply that was appended.
    ///
    /// The user message is appended before any network call, so a failed
    /// call leaves it in the history with no assistant message after it and
    /// the error is the caller's to display.
    pub async fn handle_input(&mut self, input: &str) -> Result<Option<String>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        self.session.push_user(input);

        let reply = match Intent::classify(input) {
            Intent::NewsSearch { keyword } => {
                let items = self
                    .news
                    .search(&keyword, &self.category, self.config.max_news_items)
                    .await?;
                digest::summarize(&items, self.config.max_news_items)
            }
            Intent::Chat => {
                let mut outbound = Vec::new();
                if !self.developer_instruction.trim().is_empty() {
                    outbound.push(Message::developer(self.developer_instruction.clone()));
                }
                outbound.push(Message::system(PERSONA));
                outbound.extend(self.session.messages.iter().cloned());
                self.chat
                    .send_messages(&outbound, self.config.max_output_tokens)
                    .await?
            }
        };

        // An empty reply is a degraded parse, not an error; it still becomes
        // an assistant turn.
        self.session.push_assistant(reply.clone());
        Ok(Some(reply))
    }

    /// Headlines for the selected category, served through the session cache
    /// under the configured TTL.
    pub async fn category_news(&mut self) -> Result<Vec<NewsItem>> {
        let ttl = Duration::seconds(self.config.news_ttl_secs as i64);
        let now = Utc::now();

        if let Some(items) = self.session.cached_news(&self.category, ttl, now) {
            return Ok(items.to_vec());
        }

        let items = self
            .news
            .fetch_category(&self.category, self.config.max_news_items)
            .await?;
        self.session
            .store_news(self.category.clone(), items.clone(), now);
        Ok(items)
    }

    /// Clear the history and reseed the greeting.
    pub fn reset_conversation(&mut self) {
        self.session.reset();
    }

    /// Drop the news cache so the next read refetches every category.
    pub fn refresh_news(&mut self) {
        self.session.clear_news_cache();
    }
}
