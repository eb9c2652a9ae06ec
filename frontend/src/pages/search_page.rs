use std::rc::Rc;

use dioxus::prelude::*;

use common::query_composer::{ComposeMode, MemoryStore, QueryComposer};
use common::query_service::QueryService;
use common::search_filters::SearchFilters;
use common::search_query::SerializedQuery;
use crate::{
    api::{search_api::load_search_settings, server_query_service::ServerQueryService},
    components::{
        error_boundary::ComponentErrorDisplay,
        search_filters::debounce::use_latest_request,
        search_components::{
            filter_list::FilterList, search_context::SearchContext, search_description_view::SearchDescriptionView,
            search_input_top_bar::SearchInputTopBar, search_result_list::SearchResultList,
        },
        suspend_boundary::{LoadingIndicator, SuspendWrapper},
    },
    data_definitions::url_query::UrlQuery,
};

/// Search page; the URL query string is the search.
#[component]
pub fn SearchPage(query: UrlQuery) -> Element {
    rsx! {
        Title { "ANET Search" }
        SearchPageRootComponent { query: query.0.clone() }
    }
}

#[component]
fn SearchPageRootComponent(query: ReadSignal<SerializedQuery>) -> Element {
    let settings = use_resource(load_search_settings);
    let composer = use_signal(|| None::<QueryComposer>);
    let store = use_hook(|| Rc::new(MemoryStore::default()));
    let mut ctx = use_context_provider(|| SearchContext { composer });
    let latest = use_latest_request();

    // rehydrate whenever the URL carries a search other than the live one
    use_effect(move || {
        let incoming = query.read().clone();
        let settings = match &*settings.read() {
            Some(Ok(settings)) => settings.clone(),
            _ => return,
        };
        let ticket = latest.issue();
        let current = composer.peek().as_ref().map(|c| c.share_query().to_query_string());
        if current.as_deref() == Some(incoming.to_query_string().as_str()) {
            return;
        }
        let store = store.clone();
        let latest = latest.clone();
        spawn(async move {
            dioxus::logger::tracing::info!("rehydrating search from {} query keys", incoming.len());
            let search_filters = Rc::new(SearchFilters::new(&settings));
            let service: Rc<dyn QueryService> = Rc::new(ServerQueryService);
            let rehydrated = QueryComposer::rehydrated(search_filters, ComposeMode::Live, store, &incoming, &service).await;
            if !latest.is_current(ticket) {
                dioxus::logger::tracing::debug!("dropping rehydration of an older URL");
                return;
            }
            ctx.composer.set(Some(rehydrated));
        });
    });

    if let Some(Err(e)) = settings.read().as_ref() {
        return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } };
    }
    if composer.read().is_none() {
        return rsx! { LoadingIndicator {} };
    }

    rsx! {
        div {
            id: "x-search-page-root-component",
            class: "x-search-page",
            div {
                id: "x-search-input-top-bar",
                class: "x-search-top-bar",
                SearchInputTopBar {}
            }
            SearchDescriptionView { composer, show_draft: false, show_placeholders: false }
            div {
                id: "x-search-results-bottom-space",
                class: "x-search-bottom",
                div {
                    id: "x-search-filters-left-panel",
                    class: "x-search-left-panel",
                    FilterList { composer, on_requery: move |_: ()| ctx.sync_url() }
                }
                div {
                    id: "x-search-results-right-panel",
                    class: "x-search-right-panel",
                    SuspendWrapper { SearchResultList {} }
                }
            }
        }
    }
}
