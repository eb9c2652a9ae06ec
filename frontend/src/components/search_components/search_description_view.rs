use common::query_composer::QueryComposer;
use common::search_description::SearchDescription;
use dioxus::prelude::*;

/// Recap of the submitted search, or of the draft while one is being edited.
#[component]
pub fn SearchDescriptionView(composer: Signal<Option<QueryComposer>>, show_draft: bool, show_placeholders: bool) -> Element {
    let description = use_memo(move || {
        let guard = composer.read();
        let current = guard.as_ref()?;
        let state = if show_draft { current.state() } else { current.submitted() };
        Some(SearchDescription::new(current.search_filters(), state).render(true, show_placeholders))
    });
    rsx! {
        if let Some(description) = description() {
            div { class: "x-search-description", "{description}" }
        }
    }
}
