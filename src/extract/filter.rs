//! Rules deciding which tweet bodies are kept.

use std::fmt;

/// Substring present in every shortened link (http and https).
pub const LINK_MARKER: &str = "://t.co/";

/// Leading marker of a classic retweet.
pub const RETWEET_PREFIX: &str = "RT @";

/// Why a record was not kept. Exactly one applies to any skipped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No text field, or only whitespace in it.
    Malformed,
    /// Contains a t.co link.
    Link,
    /// Starts with "RT @".
    Retweet,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Malformed => "empty or malformed",
            SkipReason::Link => "contains link",
            SkipReason::Retweet => "retweet",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Accept(&'a str),
    Skip(SkipReason),
}

/// Classify a raw tweet body. First match wins: empty, link, retweet.
/// A retweet carrying a link is therefore a link skip.
pub fn classify(raw: &str) -> Verdict<'_> {
    let text = raw.trim();
    if text.is_empty() {
        Verdict::Skip(SkipReason::Malformed)
    } else if text.contains(LINK_MARKER) {
        Verdict::Skip(SkipReason::Link)
    } else if text.starts_with(RETWEET_PREFIX) {
        Verdict::Skip(SkipReason::Retweet)
    } else {
        Verdict::Accept(text)
    }
}
