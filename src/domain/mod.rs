//! Domain entities and value objects shared by the persistence and service layers.

pub mod category;
pub mod language;
pub mod post;
pub mod tag;
pub mod translation;
pub mod types;
