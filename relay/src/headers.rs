//! Ordered, case-insensitive header collections.
//!
//! HTTP header names are case-insensitive and may repeat, so the forwarded
//! set is kept as an ordered list of (name, value) pairs with
//! case-insensitive helpers instead of a native map keyed by exact name.

use axum::http::HeaderMap;

/// An ordered multimap of header name/value pairs.
///
/// Lookups, removals, and membership checks compare names
/// case-insensitively; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardHeaders {
    pairs: Vec<(String, String)>,
}

impl ForwardHeaders {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Copy every header out of a native `HeaderMap`, whichever side of
    /// the exchange it came from.
    ///
    /// Repeated names keep all their values. Values that are not valid
    /// visible ASCII are decoded lossily rather than dropped, so a
    /// malformed-but-present header still makes it into the set.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let mut pairs = Vec::with_capacity(headers.len());

        for (name, value) in headers.iter() {
            let value = match value.to_str() {
                Ok(v) => v.to_string(),
                Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
            };
            pairs.push((name.as_str().to_string(), value));
        }

        Self { pairs }
    }

    /// First value for a name, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether any header with this name is present (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Append a header, keeping any existing values for the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Replace all values for a name with a single one.
    ///
    /// The stored name uses the casing given here, not whatever casing the
    /// removed entries had.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.remove(name);
        self.push(name, value);
    }

    /// Remove every value for a name (case-insensitive). Returns the number
    /// of entries removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        before - self.pairs.len()
    }

    /// Remove every header whose name contains the fragment
    /// (case-insensitive substring match). Returns the number removed.
    pub fn remove_containing(&mut self, fragment: &str) -> usize {
        let fragment = fragment.to_ascii_lowercase();
        let before = self.pairs.len();
        self.pairs
            .retain(|(n, _)| !n.to_ascii_lowercase().contains(&fragment));
        before - self.pairs.len()
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of name/value entries (repeated names count each value).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_from_header_map_copies_all_values() {
        let mut map = HeaderMap::new();
        map.insert("content-type", HeaderValue::from_static("text/plain"));
        map.append("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        map.append("x-forwarded-for", HeaderValue::from_static("10.0.0.2"));

        let headers = ForwardHeaders::from_header_map(&map);

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("content-type"), Some("text/plain"));

        let forwarded: Vec<&str> = headers
            .iter()
            .filter(|(n, _)| *n == "x-forwarded-for")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(forwarded, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_from_header_map_keeps_opaque_values() {
        let mut map = HeaderMap::new();
        map.insert(
            "x-opaque",
            HeaderValue::from_bytes(&[0xF0, 0x28, 0x8C, 0x28]).unwrap(),
        );

        let headers = ForwardHeaders::from_header_map(&map);

        assert_eq!(headers.len(), 1);
        assert!(headers.contains("x-opaque"));
    }

    #[test]
    fn test_from_header_map_works_for_response_headers() {
        let mut map = HeaderMap::new();
        map.insert("server", HeaderValue::from_static("nginx"));
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));

        let headers = ForwardHeaders::from_header_map(&map);

        assert_eq!(headers.get("server"), Some("nginx"));
        assert_eq!(headers.iter().filter(|(n, _)| *n == "set-cookie").count(), 2);
    }

    #[test]
    fn test_get_and_contains_are_case_insensitive() {
        let mut headers = ForwardHeaders::new();
        headers.push("Content-Type", "application/json");

        assert!(headers.contains("content-type"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert_eq!(headers.get("content-TYPE"), Some("application/json"));
        assert_eq!(headers.get("content-length"), None);
    }

    #[test]
    fn test_get_returns_first_value() {
        let mut headers = ForwardHeaders::new();
        headers.push("Accept", "text/html");
        headers.push("accept", "application/json");

        assert_eq!(headers.get("ACCEPT"), Some("text/html"));
    }

    #[test]
    fn test_set_replaces_every_casing() {
        let mut headers = ForwardHeaders::new();
        headers.push("x-hub-signature-256", "sha1=old");
        headers.push("X-Hub-Signature-256", "sha1=older");

        headers.set("X-Hub-Signature-256", "sha256=new");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-hub-signature-256"), Some("sha256=new"));
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut headers = ForwardHeaders::new();
        headers.push("Host", "a.example.com");
        headers.push("HOST", "b.example.com");
        headers.push("Content-Type", "application/json");

        let removed = headers.remove("host");

        assert_eq!(removed, 2);
        assert!(!headers.contains("host"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_remove_containing_matches_substrings() {
        let mut headers = ForwardHeaders::new();
        headers.push("X-Hub-Signature-256", "sha256=abc");
        headers.push("X-Gitlab-Signature", "def");
        headers.push("signature", "ghi");
        headers.push("X-GitHub-Event", "push");

        let removed = headers.remove_containing("SIGNATURE");

        assert_eq!(removed, 3);
        assert_eq!(headers.len(), 1);
        assert!(headers.contains("x-github-event"));
    }

    #[test]
    fn test_remove_containing_nothing_matched() {
        let mut headers = ForwardHeaders::new();
        headers.push("Content-Type", "application/json");

        assert_eq!(headers.remove_containing("signature"), 0);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut headers = ForwardHeaders::new();
        headers.push("a", "1");
        headers.push("b", "2");
        headers.push("c", "3");

        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_set() {
        let headers = ForwardHeaders::new();
        assert!(headers.is_empty());
        assert_eq!(headers.len(), 0);
        assert_eq!(headers.get("anything"), None);
    }
}
