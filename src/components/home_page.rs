use dioxus::prelude::*;
use crate::components::css_baseline::CssBaseline;
use crate::components::layout::{home_tree, Node};
use crate::components::primary_app_bar::PrimaryAppBar;

#[component]
pub fn Home() -> Element {
    let tree = home_tree();
    let style = tree.style().unwrap_or_default();

    rsx! {
        div { style: "{style}",
            for child in tree.children().iter().cloned() {
                {match child {
                    Node::StyleReset => rsx! { CssBaseline {} },
                    Node::AppBar => rsx! { PrimaryAppBar {} },
                    Node::Text(text) => rsx! { "{text}" },
                    nested @ Node::Container { .. } => {
                        let nested_style = nested.style().unwrap_or_default();
                        rsx! { div { style: "{nested_style}" } }
                    }
                }}
            }
        }
    }
}
