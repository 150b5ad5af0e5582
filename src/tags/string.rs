//! String-based Tag Collection
//!
//! A `SmallVec<[String; 4]>`-based implementation of [`TagCollection`] for free-form product
//! attributes such as colors and occasions. Tags are trimmed, lowercased and kept sorted so
//! that intersection is a linear merge.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::tags::collection::TagCollection;

/// A string-based tag collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StringTagCollection {
    tags: SmallVec<[String; 4]>,
}

impl StringTagCollection {
    /// Create a new string tag collection from a vector of strings.
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        let mut tags: SmallVec<[String; 4]> = tags
            .into_iter()
            .filter_map(|tag| normalize(&tag))
            .collect();

        tags.sort();
        tags.dedup();

        Self { tags }
    }

    /// Create a new string tag collection from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(ToString::to_string))
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

fn normalize(tag: &str) -> Option<String> {
    let trimmed = tag.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl TagCollection for StringTagCollection {
    type Tag = str;

    fn intersects(&self, other: &Self) -> bool {
        // Both sides are sorted, so walk them together.
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_tag_ref), Some(right_tag_ref)) = (left_tag, right_tag) {
            match left_tag_ref.cmp(right_tag_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    fn contains(&self, tag: &str) -> bool {
        normalize(tag).is_some_and(|tag| self.tags.binary_search(&tag).is_ok())
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn len(&self) -> usize {
        self.tags.len()
    }

    fn add(&mut self, tag: &str) {
        let Some(tag) = normalize(tag) else {
            return;
        };

        if let Err(pos) = self.tags.binary_search(&tag) {
            self.tags.insert(pos, tag);
        }
    }

    fn remove(&mut self, tag: &str) {
        let Some(tag) = normalize(tag) else {
            return;
        };

        if let Ok(pos) = self.tags.binary_search(&tag) {
            self.tags.remove(pos);
        }
    }
}

impl From<Vec<String>> for StringTagCollection {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<StringTagCollection> for Vec<String> {
    fn from(collection: StringTagCollection) -> Self {
        collection.tags.into_vec()
    }
}

impl FromIterator<String> for StringTagCollection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter)
    }
}
