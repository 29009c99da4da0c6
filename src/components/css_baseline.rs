use dioxus::prelude::*;

const BASELINE_CSS: Asset = asset!("/assets/baseline.css");

/// Document-wide style normalization. Renders nothing visible.
#[component]
pub fn CssBaseline() -> Element {
    rsx! {
        document::Stylesheet { href: BASELINE_CSS }
    }
}
