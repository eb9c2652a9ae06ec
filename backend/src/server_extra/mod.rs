//! Extra server routes mounted next to the application router.

pub mod export_search;
