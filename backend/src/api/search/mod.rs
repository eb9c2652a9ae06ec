//! Search API: named queries of the search core and list pages.

pub mod query_documents;

mod run_query;
pub use run_query::run_named_query;

mod search_list;
pub use search_list::{list_variables, search_list};
