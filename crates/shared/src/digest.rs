//! Renders feed items into the chat-style digest posted as an assistant turn.

use crate::models::NewsItem;

/// Reply used when a search matched nothing.
pub const NO_RESULTS: &str = "검색된 기사가 없습니다.";

const UNTITLED: &str = "제목 없음";

/// Render up to `max_articles` items as one human-readable text block: a
/// count header, one entry per article, and a closing line stringing the
/// shown headlines together. Input order is preserved; ranking is the
/// caller's job.
pub fn summarize(items: &[NewsItem], max_articles: usize) -> String {
    if items.is_empty() {
        return NO_RESULTS.to_string();
    }

    let shown = &items[..items.len().min(max_articles)];

    let mut parts = vec![format!(
        "기사 요약 (총 {}건 중 상위 {}건):\n",
        items.len(),
        shown.len()
    )];

    for (index, item) in shown.iter().enumerate() {
        let title = if item.title.is_empty() {
            UNTITLED
        } else {
            item.title.as_str()
        };
        parts.push(format!(
            "{}. {}\n출처: {} | 작성일: {}\n요약: {}\n링크: {}\n",
            index + 1,
            title,
            item.source,
            item.published,
            short_summary(&item.summary),
            item.link
        ));
    }

    let headlines = shown
        .iter()
        .filter(|item| !item.title.is_empty())
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>()
        .join(" / ");
    parts.push(format!("종합: 주요 기사 제목 — {}", headlines));

    parts.join("\n")
}

/// First sentence of the summary; without one, the first 200 characters with
/// a trailing ellipsis.
fn short_summary(summary: &str) -> String {
    let summary = summary.trim();
    match summary.split_once('.') {
        Some((first, _)) if !first.trim().is_empty() => format!("{}.", first.trim()),
        _ => format!("{}...", summary.chars().take(200).collect::<String>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, summary: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://news.example.com/{}", title),
            summary: summary.to_string(),
            published: "Mon, 03 Aug 2026 09:00:00 GMT".to_string(),
            source: "연합뉴스".to_string(),
        }
    }

    // ==================== Empty / Missing Field Tests ====================

    #[test]
    fn test_empty_input_uses_fixed_message() {
        assert_eq!(summarize(&[], 5), NO_RESULTS);
    }

    #[test]
    fn test_missing_fields_do_not_panic() {
        let digest = summarize(&[NewsItem::default()], 5);
        assert!(digest.contains("1. 제목 없음"));
        assert!(digest.contains("요약: ..."));
    }

    // ==================== Header and Cap Tests ====================

    #[test]
    fn test_header_reports_total_and_shown() {
        let items = vec![item("a1", "x."), item("a2", "y."), item("a3", "z.")];
        let digest = summarize(&items, 2);
        assert!(digest.contains("기사 요약 (총 3건 중 상위 2건):"));
        assert!(digest.contains("1. a1"));
        assert!(digest.contains("2. a2"));
        assert!(!digest.contains("3. a3"));
    }

    #[test]
    fn test_input_order_is_preserved() {
        let items = vec![item("first", "x."), item("second", "y.")];
        let digest = summarize(&items, 5);
        let first = digest.find("1. first").unwrap();
        let second = digest.find("2. second").unwrap();
        assert!(first < second);
    }

    // ==================== Short Summary Tests ====================

    #[test]
    fn test_short_summary_stops_at_first_period() {
        assert_eq!(
            short_summary("반도체 수출이 늘었다. 자세한 내용은 기사 참조."),
            "반도체 수출이 늘었다."
        );
    }

    #[test]
    fn test_short_summary_without_period_truncates() {
        let long = "가".repeat(300);
        let short = short_summary(&long);
        assert_eq!(short.chars().count(), 203);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_short_summary_short_text_without_period() {
        assert_eq!(short_summary("한 줄 요약"), "한 줄 요약...");
    }

    // ==================== Composite Line Tests ====================

    #[test]
    fn test_composite_line_joins_shown_titles() {
        let items = vec![item("a1", "x."), item("a2", "y."), item("a3", "z.")];
        let digest = summarize(&items, 2);
        assert!(digest.ends_with("종합: 주요 기사 제목 — a1 / a2"));
    }

    #[test]
    fn test_entry_carries_source_date_and_link() {
        let digest = summarize(&[item("속보", "본문.")], 5);
        assert!(digest.contains("출처: 연합뉴스 | 작성일: Mon, 03 Aug 2026 09:00:00 GMT"));
        assert!(digest.contains("요약: 본문."));
        assert!(digest.contains("링크: https://news.example.com/속보"));
    }
}
