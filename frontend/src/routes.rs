use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_query::UrlQuery;
use crate::pages::home_page::HomePage;
use crate::pages::saved_searches_page::SavedSearchesPage;
use crate::pages::search_page::SearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/search?:..query")]
    SearchPage { query: UrlQuery },


    #[route("/search/mine")]
    SavedSearchesPage {},

}

impl Route {
    pub fn search_page_from_text(text: &str) -> Self {
        let mut query = common::search_query::SerializedQuery::new();
        if !text.trim().is_empty() {
            query.insert(common::search_const::TEXT_KEY, text.trim());
        }
        Self::SearchPage { query: query.into() }
    }
}
