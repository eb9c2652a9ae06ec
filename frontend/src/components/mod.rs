pub mod error_boundary;
pub mod navbar;
pub mod search_components;
pub mod search_filters;
pub mod suspend_boundary;
