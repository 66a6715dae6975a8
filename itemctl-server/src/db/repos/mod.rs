//! Repository implementations for database access
//!
//! Repositories borrow a single connection for the duration of a request;
//! acquiring and releasing that connection is the caller's job.

pub mod items;

pub use items::{Item, ItemRepo};
