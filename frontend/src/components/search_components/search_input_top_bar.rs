use common::search_object_type::SearchObjectType;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_editor_icons::MdInsertLink, md_file_icons::MdFileDownload}};

use crate::components::search_components::advanced_search::AdvancedSearchButton;
use crate::components::search_components::save_search_button::SaveSearchButton;
use crate::components::search_components::search_context::SearchContext;

#[component]
pub fn SearchInputTopBar() -> Element {
    let mut ctx = use_context::<SearchContext>();
    let submitted_text = use_memo(move || ctx.composer.read().as_ref().map(|c| c.submitted().text.clone()).unwrap_or_default());
    let mut modified_text = use_signal(|| submitted_text.peek().clone());
    // the submitted text also changes through navigation and the advanced search
    use_effect(move || {
        modified_text.set(submitted_text());
    });
    let text_has_changed = use_memo(move || *modified_text.read() != submitted_text());
    let search_button_color = use_memo(move || if text_has_changed() { "blue" } else { "#6B7280" });
    let mut trigger_search = move |_: ()| {
        let text = modified_text.read().clone();
        ctx.edit(move |c| c.set_text(text));
    };
    let object_type = use_memo(move || ctx.composer.read().as_ref().and_then(|c| c.submitted().object_type));
    let object_type_value = object_type().map(|t| t.as_str()).unwrap_or_default();

    rsx! {
        div {
            id: "x-search-input-search-box",
            class: "x-search-box",
            button {
                class: "x-icon-button",
                onclick: move |_| trigger_search(()),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search for anything",
                value: "{modified_text}",
                oninput: move |e: Event<FormData>| modified_text.set(e.value()),
                onkeydown: move |e: Event<KeyboardData>| {
                    if e.key() == Key::Enter {
                        trigger_search(());
                    }
                },
            }
        }
        select {
            class: "x-object-type-select",
            value: "{object_type_value}",
            onchange: move |e: Event<FormData>| {
                let object_type = SearchObjectType::parse(&e.value());
                ctx.edit(move |c| c.set_object_type(object_type));
            },
            option { value: "", "Everything" }
            for object_type in SearchObjectType::ALL {
                option { key: "{object_type.as_str()}", value: "{object_type.as_str()}", "{object_type.label()}" }
            }
        }
        AdvancedSearchButton {}
        SaveSearchButton {}
        ShareButtons {}
    }
}

#[component]
fn ShareButtons() -> Element {
    let ctx = use_context::<SearchContext>();
    let query_string = use_memo(move || ctx.share_query_string().unwrap_or_default());
    let has_object_type = use_memo(move || ctx.composer.read().as_ref().is_some_and(|c| c.submitted().object_type.is_some()));
    let do_copy_link = move |_: MouseEvent| {
        let Some(window) = web_sys::window() else { return };
        let Ok(url) = window.location().href() else { return };
        let _r = window.navigator().clipboard().write_text(&url);
        dioxus::logger::tracing::info!("Link copied to clipboard: {}", url);
    };
    rsx! {
        button {
            class: "x-icon-button",
            title: "Copy link to this search",
            onclick: do_copy_link,
            Icon { icon: MdInsertLink, style: "width: 22px; height: 22px;" }
        }
        if has_object_type() {
            a {
                class: "x-icon-button",
                title: "Export results",
                target: "_blank",
                href: "/_export_search?{query_string}",
                Icon { icon: MdFileDownload, style: "width: 22px; height: 22px;" }
            }
        }
    }
}
