pub mod slug;

pub use slug::{slugify, validate_slug};
