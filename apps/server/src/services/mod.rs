//! Business logic services

pub mod sessions;
