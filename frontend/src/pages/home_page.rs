use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use common::search_object_type::SearchObjectType;
use common::search_query::SerializedQuery;
use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "ANET - Home" }
        div {
            id: "x-home-container",
            class: "x-home",
            div { class: "x-home-title", "Search ANET" }
            div {
                class: "x-home-subtitle",
                "Find reports, people, organizations, positions, locations, tasks and events."
            }
            SearchCardInput {}
            div {
                class: "x-home-shortcuts",
                for object_type in SearchObjectType::ALL {
                    ObjectTypeShortcut { key: "{object_type.as_str()}", object_type }
                }
            }
        }
    }
}

#[component]
fn SearchCardInput() -> Element {
    let n2 = navigator();
    let mut search_q = use_signal(|| "".to_string());
    rsx! {
        div {
            class: "x-search-box",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
            input {
                r#type: "text",
                placeholder: "Search for anything",
                oninput: move |e| {
                    *search_q.write() = e.value();
                },
                onkeypress: move |e| {
                    if e.key() == Key::Enter {
                        e.prevent_default();
                        n2.push(Route::search_page_from_text(&search_q.read()));
                    }
                },
            }
        }
    }
}

#[component]
fn ObjectTypeShortcut(object_type: SearchObjectType) -> Element {
    let mut query = SerializedQuery::new();
    query.insert(common::search_const::OBJECT_TYPE_KEY, object_type.as_str());
    rsx! {
        Link {
            class: "x-home-shortcut",
            to: Route::SearchPage { query: query.into() },
            "{object_type.label()}"
        }
    }
}
