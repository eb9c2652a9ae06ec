pub mod home_page;
pub mod saved_searches_page;
pub mod search_page;
