//! Pure utilities shared by compile stage plugins.

pub mod encode;
pub mod identifier;
pub mod uri;
