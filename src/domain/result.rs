//! Search hit and search result models.
//!
//! A [`Hit`] is one raw record from the API response. A [`SearchResult`] is a
//! hit that resolved to a displayable title and URL. Comment hits usually have
//! no title or URL of their own and fall back to the story they belong to.

use serde::Deserialize;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// One raw hit from the search API, before normalization.
///
/// Every field is optional: the API returns `null` or omits fields depending
/// on the item type (story, comment, poll).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Hit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default)]
    pub story_url: Option<String>,
    #[serde(default, rename = "objectID")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
}

/// A normalized search result ready for display.
///
/// # Fields
///
/// - `id`: the hit's `objectID`, or `"<page>-<position>"` when absent
/// - `title`, `url`: resolved from the primary fields or their `story_*` fallbacks
/// - `author`, `points`, `created_at`: optional metadata carried over from the hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub points: Option<i64>,
    pub created_at: Option<i64>,
}

impl SearchResult {
    /// Builds a result from a hit, or `None` when the title or URL cannot be
    /// resolved to a non-empty value.
    ///
    /// `page` and `position` only feed the synthesized id used when the hit
    /// has no `objectID`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hn_search::domain::{Hit, SearchResult};
    ///
    /// let hit = Hit {
    ///     title: Some(String::new()),
    ///     story_title: Some("Ask HN: Rust?".to_string()),
    ///     url: Some("https://news.ycombinator.com".to_string()),
    ///     ..Hit::default()
    /// };
    /// let result = SearchResult::from_hit(&hit, 0, 0).unwrap();
    /// assert_eq!(result.title, "Ask HN: Rust?");
    /// ```
    #[must_use]
    pub fn from_hit(hit: &Hit, page: usize, position: usize) -> Option<Self> {
        let title = resolve(hit.title.as_deref(), hit.story_title.as_deref())?;
        let url = resolve(hit.url.as_deref(), hit.story_url.as_deref())?;

        let id = hit
            .object_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("{page}-{position}"));

        Some(Self {
            id,
            title,
            url,
            author: hit.author.clone(),
            points: hit.points,
            created_at: hit.created_at_i,
        })
    }

    /// Returns the URL's host without a leading `www.`, if the URL parses.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    /// Returns how long ago the item was created, relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn time_ago_at(&self, now: i64) -> Option<String> {
        let created_at = self.created_at?;
        let diff = now.saturating_sub(created_at).max(0);

        Some(if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        })
    }
}

/// Maps hits of one response page to results, dropping unresolvable hits.
///
/// Order is preserved; the output is never longer than the input.
#[must_use]
pub fn normalize_hits(hits: &[Hit], page: usize) -> Vec<SearchResult> {
    let results: Vec<SearchResult> = hits
        .iter()
        .enumerate()
        .filter_map(|(position, hit)| SearchResult::from_hit(hit, page, position))
        .collect();

    tracing::debug!(
        hit_count = hits.len(),
        result_count = results.len(),
        dropped = hits.len() - results.len(),
        "hits normalized"
    );

    results
}

/// Picks the primary value when non-empty, else the alternate when non-empty.
fn resolve(primary: Option<&str>, alternate: Option<&str>) -> Option<String> {
    primary
        .filter(|value| !value.is_empty())
        .or_else(|| alternate.filter(|value| !value.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: Option<&str>, url: Option<&str>) -> Hit {
        Hit {
            title: title.map(String::from),
            url: url.map(String::from),
            ..Hit::default()
        }
    }

    #[test]
    fn primary_fields_win_when_present() {
        let mut h = hit(Some("Rust 1.0"), Some("https://rust-lang.org"));
        h.story_title = Some("other".to_string());
        h.story_url = Some("https://other.example".to_string());

        let result = SearchResult::from_hit(&h, 0, 0).unwrap();
        assert_eq!(result.title, "Rust 1.0");
        assert_eq!(result.url, "https://rust-lang.org");
    }

    #[test]
    fn empty_primary_falls_back_to_story_fields() {
        let h = Hit {
            title: Some(String::new()),
            url: Some(String::new()),
            story_title: Some("Story".to_string()),
            story_url: Some("https://story.example".to_string()),
            ..Hit::default()
        };

        let result = SearchResult::from_hit(&h, 0, 0).unwrap();
        assert_eq!(result.title, "Story");
        assert_eq!(result.url, "https://story.example");
    }

    #[test]
    fn missing_primary_falls_back_to_story_fields() {
        let h = Hit {
            story_title: Some("Comment parent".to_string()),
            story_url: Some("https://parent.example".to_string()),
            ..Hit::default()
        };

        let result = SearchResult::from_hit(&h, 0, 0).unwrap();
        assert_eq!(result.title, "Comment parent");
        assert_eq!(result.url, "https://parent.example");
    }

    #[test]
    fn unresolvable_hits_are_dropped() {
        let hits = vec![
            hit(Some("Has both"), Some("https://a.example")),
            hit(Some("No url"), None),
            hit(None, Some("https://no-title.example")),
            hit(Some(""), Some("")),
            Hit::default(),
        ];

        let results = normalize_hits(&hits, 0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Has both");
        assert!(results.len() <= hits.len());
    }

    #[test]
    fn ids_prefer_object_id_and_fall_back_to_position() {
        let mut with_id = hit(Some("a"), Some("https://a.example"));
        with_id.object_id = Some("8863".to_string());
        let without_id = hit(Some("b"), Some("https://b.example"));

        let results = normalize_hits(&[with_id, without_id], 4);
        assert_eq!(results[0].id, "8863");
        assert_eq!(results[1].id, "4-1");
    }

    #[test]
    fn hit_deserializes_api_field_names() {
        let json = r#"{
            "title": null,
            "url": null,
            "story_title": "Show HN",
            "story_url": "https://show.example",
            "objectID": "42",
            "author": "pg",
            "points": null,
            "created_at_i": 1700000000,
            "_tags": ["comment"]
        }"#;

        let h: Hit = serde_json::from_str(json).unwrap();
        assert_eq!(h.object_id.as_deref(), Some("42"));
        assert_eq!(h.created_at_i, Some(1_700_000_000));
        assert!(h.title.is_none());
    }

    #[test]
    fn host_strips_www_prefix() {
        let result = SearchResult::from_hit(&hit(Some("t"), Some("https://www.rust-lang.org/learn")), 0, 0).unwrap();
        assert_eq!(result.host().as_deref(), Some("rust-lang.org"));

        let result = SearchResult::from_hit(&hit(Some("t"), Some("not a url")), 0, 0).unwrap();
        assert!(result.host().is_none());
    }

    #[test]
    fn time_ago_buckets() {
        let mut h = hit(Some("t"), Some("https://a.example"));
        h.created_at_i = Some(1_000_000);
        let result = SearchResult::from_hit(&h, 0, 0).unwrap();

        assert_eq!(result.time_ago_at(1_000_030).as_deref(), Some("just now"));
        assert_eq!(result.time_ago_at(1_000_300).as_deref(), Some("5m ago"));
        assert_eq!(result.time_ago_at(1_000_000 + 3 * 3600).as_deref(), Some("3h ago"));
        assert_eq!(result.time_ago_at(1_000_000 + 7 * 86400).as_deref(), Some("7d ago"));
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let mut h = hit(Some("t"), Some("https://a.example"));
        h.created_at_i = Some(i64::MIN);
        let ancient = SearchResult::from_hit(&h, 0, 0).unwrap();
        assert_eq!(
            ancient.time_ago_at(1_700_000_000),
            Some(format!("{}d ago", i64::MAX / 86400))
        );

        h.created_at_i = Some(i64::MAX);
        let future = SearchResult::from_hit(&h, 0, 0).unwrap();
        assert_eq!(future.time_ago_at(i64::MIN).as_deref(), Some("just now"));
    }
}
