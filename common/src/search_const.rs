//! Shared search constants.

/// Default number of results per page of a list query.
pub const PAGE_SIZE: u64 = 10;

/// Free-text key of a serialized query.
pub const TEXT_KEY: &str = "text";
/// Object-type key of a shareable query; never sent to the list query.
pub const OBJECT_TYPE_KEY: &str = "objectType";

/// Store key holding the current results page.
pub const STORE_PAGE_NUM: &str = "pageNum";
/// Store key holding the submitted free-text search.
pub const STORE_SEARCH_TEXT: &str = "searchText";

/// Delay applied to free-text and numeric inputs before they propagate.
pub const INPUT_DEBOUNCE_MS: u32 = 300;
