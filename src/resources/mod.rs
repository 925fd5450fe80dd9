//! Resource facades over the dispatcher

pub mod catalogue;
pub mod countries;
pub mod orders;

pub use catalogue::Catalogue;
pub use countries::Countries;
pub use orders::{ListOptions, Orders, DEFAULT_LIST_LIMIT};
