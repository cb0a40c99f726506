//! Diesel row types and their conversions into domain records.

pub mod category;
pub mod config;
pub mod language;
pub mod post;
pub mod tag;
