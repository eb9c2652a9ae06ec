use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: |_s: SuspenseContext| rsx! {
                div { class: "x-fill x-centered", LoadingIndicator {} }
            },
            ComponentErrorBoundary { children }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "x-loading", "Loading..." }
    }
}
