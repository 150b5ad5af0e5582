//! Tag Collection
//!
//! A collection-based tagging system for cheap intersection tests.

use std::fmt;

/// Trait for tag collections that support intersection tests.
pub trait TagCollection: Clone + fmt::Debug + PartialEq + Default {
    /// Type of a single tag.
    type Tag: ?Sized;

    /// Check if this collection intersects with another collection.
    /// Returns true if they have at least one tag in common.
    fn intersects(&self, other: &Self) -> bool;

    /// Check if this collection contains a specific tag.
    fn contains(&self, tag: &Self::Tag) -> bool;

    /// Check if this collection is empty.
    fn is_empty(&self) -> bool;

    /// Get the number of tags in this collection.
    fn len(&self) -> usize;

    /// Add a tag to this collection.
    fn add(&mut self, tag: &Self::Tag);

    /// Remove a tag from this collection.
    fn remove(&mut self, tag: &Self::Tag);

    /// Check a set of available tags against a user selection.
    ///
    /// An empty selection places no constraint, otherwise at least one selected tag must be
    /// available.
    fn satisfies(&self, selection: &Self) -> bool {
        selection.is_empty() || self.intersects(selection)
    }
}
