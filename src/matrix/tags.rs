//! Tag ("space") membership
//!
//! Tags are persisted as a list of labels. Older data stored them as a single
//! delimited string such as `"Work, Personal"`; both forms load into the same
//! token set.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MatrixError;

/// Separator between tags in the delimited string form
pub const TAG_DELIMITER: &str = ", ";

/// Outcome of a membership test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMatch {
    /// A token equals the queried tag
    Matched,
    Unmatched,
    /// The queried tag contains the delimiter and was compared against the
    /// whole joined string instead of token by token
    Degraded { matched: bool },
}

impl TagMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, TagMatch::Matched | TagMatch::Degraded { matched: true })
    }
}

/// Ordered set of tag labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a delimited tag string into tokens, dropping empty ones
    pub fn parse(raw: &str) -> Self {
        raw.split(TAG_DELIMITER).collect()
    }

    /// Add a tag unless it is empty or already present
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The legacy single-string form, e.g. `"Work, Personal"`
    pub fn joined(&self) -> String {
        self.0.join(TAG_DELIMITER)
    }

    /// Exact, case-sensitive token membership
    ///
    /// A query containing the delimiter cannot be a single token; it is
    /// compared against the joined string (or a stored label equal to it) and
    /// reported as [`TagMatch::Degraded`].
    pub fn contains(&self, tag: &str) -> TagMatch {
        if tag.contains(TAG_DELIMITER) {
            let matched = self.joined() == tag || self.0.iter().any(|t| t == tag);
            return TagMatch::Degraded { matched };
        }
        if self.0.iter().any(|t| t == tag) {
            TagMatch::Matched
        } else {
            TagMatch::Unmatched
        }
    }

    /// Error describing a degraded match for `tag`, for the caller to log
    pub fn ambiguity(tag: &str) -> Option<MatrixError> {
        tag.contains(TAG_DELIMITER)
            .then(|| MatrixError::AmbiguousTagFormat {
                tag: tag.to_string(),
            })
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTags {
    Delimited(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StoredTags::deserialize(deserializer)? {
            StoredTags::Delimited(raw) => Tags::parse(&raw),
            StoredTags::List(list) => list.into_iter().collect(),
        })
    }
}
