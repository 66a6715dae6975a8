//! Route handlers organized by resource

pub mod admin;
pub mod health;
pub mod items;
pub mod query;
