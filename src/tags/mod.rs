//! Tags
//!
//! Small sorted sets used for product attributes that filters intersect against
//! (colors, occasions and sizes).

pub mod collection;
pub mod sizes;
pub mod string;

pub use collection::TagCollection;
pub use sizes::SizeSet;
pub use string::StringTagCollection;
