//! # TaskDeck Client Library
//!
//! Client-side view/state layer for the TaskDeck API: an HTTP client over
//! the REST surface and an explicit cache object that holds the fetched
//! lists and reconciles them after each mutation. Any UI (or the bundled
//! CLI) can sit on top of these without its own state rules.
//!
//! ## Modules
//!
//! - `api`: HTTP client for the task and user endpoints
//! - `cache`: Local task/user cache with reconciliation and derived views

pub mod api;
pub mod cache;
