//! Heuristic routing between news-search requests and general chat.

/// What a raw user message is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The message asks for news; `keyword` is the cleaned search term.
    NewsSearch { keyword: String },
    /// Everything else goes to the chat model.
    Chat,
}

/// Words that flag a message as a news/article request, in either locale.
const TRIGGER_KEYWORDS: &[&str] = &[
    "기사", "뉴스", "요약", "검색", "요청", "summary", "article", "news", "search",
];

/// Filler tokens stripped before keyword extraction. Compound forms come
/// before their stems so "요약해줘" is removed whole instead of leaving a
/// dangling "해줘".
const NOISE_TOKENS: &[&str] = &[
    "요약해줘",
    "검색해줘",
    "정리해줘",
    "요약해",
    "정리해",
    "기사",
    "뉴스",
    "요약",
    "검색",
    "관련",
    "최신",
    "오늘",
    "summary",
    "article",
    "news",
    "search",
];

impl Intent {
    /// Best-effort classification. This intentionally mirrors the loose
    /// phrase matching users actually type; a casual mention of "news" in a
    /// chat message can route to search, and that is accepted behavior.
    pub fn classify(text: &str) -> Intent {
        let lowered = text.to_lowercase();
        if !TRIGGER_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return Intent::Chat;
        }

        let mut stripped = lowered;
        for token in NOISE_TOKENS {
            stripped = stripped.replace(token, " ");
        }

        // Drop punctuation, then tokens too short to be a useful search term.
        let cleaned: String = stripped
            .chars()
            .map(|c| if is_keyword_char(c) { c } else { ' ' })
            .collect();
        let keyword = cleaned
            .split_whitespace()
            .filter(|word| word.chars().count() > 1)
            .collect::<Vec<_>>()
            .join(" ");

        if keyword.is_empty() {
            // The message was all trigger words and filler; search for the
            // message itself rather than an empty string.
            Intent::NewsSearch {
                keyword: text.trim().to_string(),
            }
        } else {
            Intent::NewsSearch { keyword }
        }
    }
}

/// Characters that survive punctuation stripping: word characters plus the
/// Hangul jamo and syllable ranges.
fn is_keyword_char(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || ('\u{3131}'..='\u{318E}').contains(&c)
        || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}
