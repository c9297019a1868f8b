//! Document models for the content collections.
//!
//! Each struct mirrors one backing collection; free-form fields live in the
//! `attributes` JSON value. JSON serialization is camelCase to match the
//! public API surface; column mapping stays snake_case via `FromRow`.

pub mod blog;
pub mod page;
pub mod taxonomy;

pub use blog::{BlogPost, UpdateBlogPost};
pub use page::{NewPage, Page};
pub use taxonomy::{
    Category, CategoryWithChildren, Content, DeletedItems, NewCategory, NewContent, NewSection,
    Section, UpdateCategory, UpdateContent, UpdateSection,
};
