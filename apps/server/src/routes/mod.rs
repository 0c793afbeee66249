//! HTTP route handlers

pub mod groups;
pub mod sessions;
