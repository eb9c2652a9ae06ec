//! The live search of the page, shared with every search component.

use common::query_composer::QueryComposer;
use common::search_query::SerializedQuery;
use dioxus::prelude::*;

use crate::routes::Route;

#[derive(Clone, Copy)]
pub struct SearchContext {
    /// Empty until the incoming URL is rehydrated.
    pub composer: Signal<Option<QueryComposer>>,
}

impl SearchContext {
    /// Applies a live edit; a re-query is mirrored into the URL.
    pub fn edit(&mut self, f: impl FnOnce(&mut QueryComposer) -> Option<SerializedQuery>) {
        let requery = self.composer.write().as_mut().and_then(f);
        if requery.is_some() {
            self.sync_url();
        }
    }

    /// Installs a composer whose submitted state becomes the live search.
    pub fn replace(&mut self, composer: QueryComposer) {
        self.composer.set(Some(composer));
        self.sync_url();
    }

    pub fn set_page_num(&mut self, page_num: u64) {
        if let Some(composer) = self.composer.write().as_mut() {
            composer.set_page_num(page_num);
        }
    }

    /// Query string of the shareable link of the current search.
    pub fn share_query_string(&self) -> Option<String> {
        self.composer.read().as_ref().map(|c| c.share_query().to_query_string())
    }

    /// Mirrors the live search into the URL.
    pub fn sync_url(&self) {
        let Some(query) = self.composer.peek().as_ref().map(|c| c.share_query()) else {
            return;
        };
        navigator().replace(Route::SearchPage { query: query.into() });
    }
}
