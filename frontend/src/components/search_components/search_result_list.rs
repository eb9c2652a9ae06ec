//! Results of the live search, one page at a time.

use common::search_result::{SearchListResult, SearchResultItem};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

use crate::api::search_api::search_list;
use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::search_components::search_context::SearchContext;
use crate::components::suspend_boundary::LoadingIndicator;

#[component]
pub fn SearchResultList() -> Element {
    let mut ctx = use_context::<SearchContext>();
    let request = use_memo(move || ctx.composer.read().as_ref().and_then(|c| c.list_request()));
    // nothing is listed until an object type is picked
    let search_result = use_resource(move || {
        let request = request();
        async move {
            match request {
                Some(request) => search_list(request).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let search_result = search_result.read();
    let page = match search_result.as_ref() {
        Some(Err(e)) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Some(Ok(Some(page))) => page.clone(),
        Some(Ok(None)) => {
            return rsx! { div { class: "x-results-hint", "Pick what to search for to list results." } };
        }
        None => return rsx! { LoadingIndicator {} },
    };

    let items = page.list.iter().filter_map(SearchResultItem::from_row).collect::<Vec<_>>();
    rsx! {
        div {
            class: "x-results",
            PaginationControls { page: page.clone(), on_page: move |n: u64| ctx.set_page_num(n) }
            if items.is_empty() {
                div { class: "x-results-hint", "No results found." }
            }
            ul {
                class: "x-results-list",
                for item in items {
                    li { key: "{item.uuid}", class: "x-result-item", "{item.label}" }
                }
            }
        }
    }
}

#[component]
fn PaginationControls(page: SearchListResult, on_page: Callback<u64>) -> Element {
    let page_num = page.page_num;
    let page_count = page.page_count().max(1);
    rsx! {
        div {
            class: "x-pagination",
            span { "{page.total_count} results" }
            div { style: "flex-grow: 1;" }
            button {
                class: "x-icon-button",
                disabled: page_num == 0,
                onclick: move |_| on_page.call(page_num.saturating_sub(1)),
                Icon { icon: MdArrowBack, style: "width: 20px; height: 20px;" }
            }
            span { "{page_num + 1} / {page_count}" }
            button {
                class: "x-icon-button",
                disabled: !page.has_next_page(),
                onclick: move |_| on_page.call(page_num + 1),
                Icon { icon: MdArrowForward, style: "width: 20px; height: 20px;" }
            }
        }
    }
}
