//! Staged editing of the search in a popover: edits wait for "Search".

use common::query_composer::{ComposeMode, QueryComposer};
use common::search_object_type::SearchObjectType;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_image_icons::MdTune};

use crate::components::search_components::filter_list::FilterList;
use crate::components::search_components::search_context::SearchContext;
use crate::components::search_components::search_description_view::SearchDescriptionView;

#[component]
pub fn AdvancedSearchButton() -> Element {
    let ctx = use_context::<SearchContext>();
    let mut staged = use_signal(|| None::<QueryComposer>);
    let open = move |_: MouseEvent| {
        let forked = ctx.composer.peek().as_ref().map(|c| c.fork(ComposeMode::Staged));
        staged.set(forked);
    };
    rsx! {
        button {
            class: "x-icon-button",
            title: "Advanced search",
            onclick: open,
            Icon { icon: MdTune, style: "width: 22px; height: 22px;" }
        }
        if staged.read().is_some() {
            AdvancedSearchPopover { staged }
        }
    }
}

#[component]
fn AdvancedSearchPopover(staged: Signal<Option<QueryComposer>>) -> Element {
    let mut ctx = use_context::<SearchContext>();
    let mut staged = staged;
    let draft_text = use_memo(move || staged.read().as_ref().map(|c| c.state().text.clone()).unwrap_or_default());
    let draft_type = use_memo(move || staged.read().as_ref().and_then(|c| c.state().object_type));
    let draft_type_value = draft_type().map(|t| t.as_str()).unwrap_or_default();
    let has_edits = use_memo(move || staged.read().as_ref().is_some_and(|c| c.has_staged_edits()));

    let submit = move |_: MouseEvent| {
        let mut taken = staged.write().take();
        if let Some(composer) = taken.as_mut() {
            composer.submit();
            ctx.replace(composer.fork(ComposeMode::Live));
        }
    };
    let cancel = move |_: MouseEvent| {
        if let Some(composer) = staged.write().as_mut() {
            composer.cancel();
        }
        staged.set(None);
    };

    rsx! {
        div { class: "x-popover-backdrop", onclick: cancel }
        div {
            class: "x-popover",
            onclick: move |e| e.stop_propagation(),
            div {
                class: "x-popover-row",
                input {
                    r#type: "text",
                    placeholder: "Search text",
                    value: "{draft_text}",
                    oninput: move |e: Event<FormData>| {
                        if let Some(composer) = staged.write().as_mut() {
                            composer.set_text(e.value());
                        }
                    },
                }
                select {
                    value: "{draft_type_value}",
                    onchange: move |e: Event<FormData>| {
                        let object_type = SearchObjectType::parse(&e.value());
                        if let Some(composer) = staged.write().as_mut() {
                            composer.set_object_type(object_type);
                        }
                    },
                    option { value: "", "Everything" }
                    for object_type in SearchObjectType::ALL {
                        option { key: "{object_type.as_str()}", value: "{object_type.as_str()}", "{object_type.label()}" }
                    }
                }
            }
            FilterList { composer: staged, on_requery: move |_: ()| {} }
            SearchDescriptionView { composer: staged, show_draft: true, show_placeholders: true }
            div {
                class: "x-popover-actions",
                button { class: "x-button", onclick: cancel, "Cancel" }
                button {
                    class: if has_edits() { "x-button x-button-primary" } else { "x-button" },
                    onclick: submit,
                    "Search"
                }
            }
        }
    }
}
