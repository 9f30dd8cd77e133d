//! Core functionality: categories, document storage, form mapping, and configuration

pub mod category;
pub mod config;
pub mod document;
pub mod error;
pub mod literal;
pub mod record;
pub mod session;
pub mod store;
