use dioxus::prelude::*;
use crate::Route;

pub const DEFAULT_TITLE: &str = "SERVERHUB";

/// Ambient settings for the top bar, provided by whoever mounts the app.
#[derive(Clone, PartialEq)]
pub struct AppBarTheme {
    pub title: String,
}

/// Drawer visibility shared with an ancestor. Without one the bar keeps its own.
#[derive(Clone, Copy)]
pub struct DrawerState(pub Signal<bool>);

pub fn toggle_drawer(mut open: Signal<bool>) {
    let next = !*open.peek();
    tracing::debug!("App bar drawer open: {}", next);
    open.set(next);
}

#[component]
pub fn PrimaryAppBar() -> Element {
    let title = try_use_context::<AppBarTheme>()
        .map(|theme| theme.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let local_drawer = use_signal(|| false);
    let drawer_open = try_use_context::<DrawerState>()
        .map(|state| state.0)
        .unwrap_or(local_drawer);

    rsx! {
        header { class: "app-bar",
            div { class: "app-bar-toolbar",
                button {
                    class: "app-bar-menu-button",
                    r#type: "button",
                    aria_label: "open drawer",
                    onclick: move |_| toggle_drawer(drawer_open),
                    "☰"
                }
                a { class: "app-bar-title", href: "/", "{title}" }
            }
        }
        if drawer_open() {
            nav { class: "app-drawer", aria_label: "navigation drawer",
                Link {
                    to: Route::Home {},
                    class: "app-drawer-link",
                    active_class: "active",
                    "Home"
                }
            }
        }
    }
}
