pub mod advanced_search;
pub mod filter_list;
pub mod save_search_button;
pub mod search_context;
pub mod search_description_view;
pub mod search_input_top_bar;
pub mod search_result_list;
