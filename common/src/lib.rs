//! Headless advanced-search core shared between frontend and backend.

extern crate serde;


pub mod search_query;
pub mod search_result;
pub mod search_const;
pub mod search_object_type;
pub mod deep_equal;
pub mod query_service;
pub mod filters;
pub mod settings;
pub mod search_filters;
pub mod search_filter_controller;
pub mod deserialize_registry;
pub mod query_composer;
pub mod search_description;
pub mod saved_search;
