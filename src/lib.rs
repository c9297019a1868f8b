//! Backend for the airbrush.ai marketing site: a content-management API over
//! a category/section/content hierarchy, generated landing pages, blog posts,
//! and a continuously maintained sitemap artifact.

pub mod api;
pub mod clients;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod sitemap;
