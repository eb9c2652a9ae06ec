//! Backend API surface used by the frontend server functions.

pub mod saved_searches;
pub mod search;
pub mod settings;
