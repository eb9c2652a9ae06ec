use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdDelete};

use common::query_service::QueryService;
use common::saved_search::{SavedSearch, describe_saved_searches};
use common::search_filters::SearchFilters;
use crate::{
    api::{
        saved_search_api::{delete_saved_search, my_saved_searches},
        search_api::load_search_settings,
        server_query_service::ServerQueryService,
    },
    components::{error_boundary::ComponentErrorDisplay, suspend_boundary::LoadingIndicator},
    routes::Route,
};

/// Saved searches of the user, each described the way its search page would be.
#[component]
pub fn SavedSearchesPage() -> Element {
    let mut listing = use_resource(move || async move {
        let settings = load_search_settings().await?;
        let searches = my_saved_searches().await?;
        let search_filters = SearchFilters::new(&settings);
        let service: Rc<dyn QueryService> = Rc::new(ServerQueryService);
        let descriptions = describe_saved_searches(&search_filters, &searches, &service).await;
        let rows = searches
            .into_iter()
            .zip(descriptions.into_iter().map(|d| d.to_string()))
            .collect::<Vec<_>>();
        Ok::<_, ServerFnError>(rows)
    });

    let content = match &*listing.read() {
        None => rsx! { LoadingIndicator {} },
        Some(Err(e)) => rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Some(Ok(rows)) if rows.is_empty() => rsx! { div { class: "x-results-hint", "No saved searches found." } },
        Some(Ok(rows)) => rsx! {
            table {
                class: "x-saved-searches",
                thead {
                    tr {
                        th { "Description" }
                        th { "Search Name" }
                        th { "Display In Homepage" }
                        th {}
                    }
                }
                tbody {
                    for (search, description) in rows.iter().cloned() {
                        SavedSearchRow {
                            key: "{search.uuid}",
                            search,
                            description,
                            on_deleted: move |_: ()| listing.restart(),
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Title { "ANET - My Saved Searches" }
        div {
            class: "x-saved-searches-page",
            h2 { "Saved searches" }
            {content}
        }
    }
}

#[component]
fn SavedSearchRow(search: SavedSearch, description: String, on_deleted: Callback<()>) -> Element {
    let to = Route::SearchPage { query: search.share_query().into() };
    let homepage = if search.display_in_homepage { "Yes" } else { "No" };
    let uuid = search.uuid.clone();
    let delete = move |_: MouseEvent| {
        let uuid = uuid.clone();
        spawn(async move {
            match delete_saved_search(uuid).await {
                Ok(()) => on_deleted.call(()),
                Err(e) => dioxus::logger::tracing::warn!("delete saved search failed: {}", e),
            }
        });
    };
    rsx! {
        tr {
            td { Link { to: to.clone(), "{description}" } }
            td { Link { to: to, "{search.name}" } }
            td { "{homepage}" }
            td {
                button {
                    class: "x-icon-button",
                    title: "Delete saved search",
                    onclick: delete,
                    Icon { icon: MdDelete, style: "width: 20px; height: 20px;" }
                }
            }
        }
    }
}
