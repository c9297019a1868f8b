//! Per-collection repositories over the shared Postgres pool.
//!
//! Each repository owns the query surface for one collection. Slug
//! uniqueness among siblings is enforced at the query level (lookups always
//! scope by parent), not by a schema constraint, and `parent` carries no
//! foreign key: cross-collection cleanup belongs to the cascade coordinator.

pub mod blog_repository;
pub mod cascade;
pub mod category_repository;
pub mod content_repository;
pub mod page_repository;
pub mod section_repository;

pub use blog_repository::BlogRepository;
pub use cascade::CascadeDeletionCoordinator;
pub use category_repository::CategoryRepository;
pub use content_repository::ContentRepository;
pub use page_repository::PageRepository;
pub use section_repository::SectionRepository;
