pub mod saved_search_api;
pub mod search_api;
pub mod server_query_service;
