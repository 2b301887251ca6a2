use anyhow::{Context, Result};
use html2text::render::text_renderer::TrivialDecorator;
use reqwest::Client;
use tracing::{info, warn};

use crate::models::NewsItem;

/// Korean Google News feeds by category. The first entry is the default and
/// the fallback for unknown category names.
const NEWS_FEEDS: &[(&str, &str)] = &[
    ("최신뉴스", "https://news.google.com/rss?hl=ko&gl=KR&ceid=KR:ko"),
    (
        "비즈니스",
        "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFZxY0d4U0FtVnVHZ0pDVXlnQVAB?oc=5",
    ),
    (
        "기술",
        "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp0Y0d4U0FtVnVHZ0pDVXlnQVAB?oc=5",
    ),
    (
        "과학",
        "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFZxY0d4U0FtVnVHZ0pDVXlnQVAB?oc=5",
    ),
];

const SEARCH_URL: &str = "https://news.google.com/rss/search";

const UNTITLED: &str = "제목 없음";
const DEFAULT_SOURCE: &str = "Google News";

pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (compatible; NewsChat/0.1)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Category names in display order.
    pub fn categories() -> Vec<&'static str> {
        NEWS_FEEDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn default_category() -> &'static str {
        NEWS_FEEDS[0].0
    }

    fn feed_url(category: &str) -> &'static str {
        NEWS_FEEDS
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, url)| *url)
            .unwrap_or(NEWS_FEEDS[0].1)
    }

    /// Latest headlines for a category feed.
    pub async fn fetch_category(&self, category: &str, max_items: usize) -> Result<Vec<NewsItem>> {
        let items = self.fetch_feed(Self::feed_url(category), max_items).await?;
        info!("fetched {} items for category {}", items.len(), category);
        Ok(items)
    }

    /// Keyword search via the Google News search feed. When the search feed
    /// comes back empty, fall back to substring-filtering the category feed
    /// so a niche keyword still has a chance to match.
    pub async fn search(
        &self,
        keyword: &str,
        category: &str,
        max_items: usize,
    ) -> Result<Vec<NewsItem>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}?q={}&hl=ko&gl=KR&ceid=KR:ko",
            SEARCH_URL,
            urlencoding::encode(keyword)
        );
        let items = self.fetch_feed(&url, max_items).await?;
        if !items.is_empty() {
            info!("search '{}' matched {} items", keyword, items.len());
            return Ok(items);
        }

        warn!(
            "search '{}' returned nothing, filtering the {} feed instead",
            keyword, category
        );
        let pool = self.fetch_category(category, max_items * 2).await?;
        let needle = keyword.to_lowercase();
        Ok(pool
            .into_iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.summary.to_lowercase().contains(&needle)
            })
            .take(max_items)
            .collect())
    }

    async fn fetch_feed(&self, url: &str, max_items: usize) -> Result<Vec<NewsItem>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch news feed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("news feed returned {}: {}", status, url);
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read news feed body")?;
        let channel = rss::Channel::read_from(&body[..])
            .with_context(|| format!("Failed to parse RSS from {}", url))?;

        Ok(channel.items().iter().take(max_items).map(news_item).collect())
    }
}

fn news_item(item: &rss::Item) -> NewsItem {
    let link = item.link().unwrap_or_default().to_string();
    let title = match item.title() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => UNTITLED.to_string(),
    };
    let source = item
        .source()
        .and_then(|source| source.title())
        .map(str::to_string)
        .or_else(|| source_from_link(&link))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    NewsItem {
        title,
        summary: item.description().map(flatten_html).unwrap_or_default(),
        published: item.pub_date().unwrap_or_default().to_string(),
        source,
        link,
    }
}

/// Google News descriptions are HTML fragments; flatten them to one line of
/// plain text. The trivial decorator keeps link text without the footnote
/// markers the default renderer adds.
fn flatten_html(html: &str) -> String {
    html2text::from_read_with_decorator(html.as_bytes(), 200, TrivialDecorator::new())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive a source name from the article host when the feed item carries no
/// `<source>` element.
fn source_from_link(link: &str) -> Option<String> {
    let parsed = url::Url::parse(link).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
