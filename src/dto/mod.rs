pub mod catalogs;
pub mod categories;
pub mod posts;
pub mod tags;
