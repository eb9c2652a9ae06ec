//! Stores the live search under a name.

use common::saved_search::is_duplicate;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdBookmarkBorder};

use crate::api::saved_search_api::{my_saved_searches, save_search};
use crate::components::search_components::search_context::SearchContext;

#[component]
pub fn SaveSearchButton() -> Element {
    let mut open = use_signal(|| false);
    rsx! {
        button {
            class: "x-icon-button",
            title: "Save this search",
            onclick: move |_| open.set(true),
            Icon { icon: MdBookmarkBorder, style: "width: 22px; height: 22px;" }
        }
        if open() {
            SaveSearchPopover { open }
        }
    }
}

#[component]
fn SaveSearchPopover(open: Signal<bool>) -> Element {
    let ctx = use_context::<SearchContext>();
    let mut open = open;
    let mut name = use_signal(String::new);
    let mut display_in_homepage = use_signal(|| false);
    let mut message = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let Some(share_query) = ctx.composer.peek().as_ref().map(|c| c.share_query()) else {
            return;
        };
        if name.read().trim().is_empty() {
            message.set(Some("Give the search a name".to_string()));
            return;
        }
        saving.set(true);
        spawn(async move {
            let existing = match my_saved_searches().await {
                Ok(existing) => existing,
                Err(e) => {
                    message.set(Some(format!("Could not load saved searches: {}", e)));
                    saving.set(false);
                    return;
                }
            };
            if is_duplicate(&existing, &share_query) {
                message.set(Some("There's already an identical saved search".to_string()));
                saving.set(false);
                return;
            }
            let name = name.peek().clone();
            match save_search(name, *display_in_homepage.peek(), share_query).await {
                Ok(uuid) => {
                    dioxus::logger::tracing::info!("search saved as {}", uuid);
                    open.set(false);
                }
                Err(e) => message.set(Some(format!("Could not save the search: {}", e))),
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "x-popover-backdrop", onclick: move |_| open.set(false) }
        div {
            class: "x-popover x-popover-small",
            onclick: move |e| e.stop_propagation(),
            div {
                class: "x-popover-row",
                input {
                    r#type: "text",
                    placeholder: "Search name",
                    value: "{name}",
                    oninput: move |e: Event<FormData>| name.set(e.value()),
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: display_in_homepage(),
                        onchange: move |e: Event<FormData>| display_in_homepage.set(e.checked()),
                    }
                    "Show on homepage"
                }
            }
            if let Some(message) = message() {
                div { class: "x-popover-message", "{message}" }
            }
            div {
                class: "x-popover-actions",
                button { class: "x-button", onclick: move |_| open.set(false), "Cancel" }
                button {
                    class: "x-button x-button-primary",
                    disabled: saving(),
                    onclick: submit,
                    "Save"
                }
            }
        }
    }
}
