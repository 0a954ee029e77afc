pub mod catalog;
pub mod date_format;
pub mod providers;
pub mod recommendations;

pub use catalog::Catalog;
pub use providers::{MovieProvider, TmdbProvider};
