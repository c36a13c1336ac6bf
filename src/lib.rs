//! Cineredux - movie metadata gateway
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod critics;
pub mod rating;
pub mod server;
pub mod tmdb;
