/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Employee listing and current-viewer endpoints
/// - `tasks`: Task CRUD and assignment endpoints

pub mod health;
pub mod tasks;
pub mod users;
