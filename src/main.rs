mod api;
mod backend;
mod components;

use components::home_page::Home;
use components::primary_app_bar::DrawerState;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let drawer_open = use_signal(|| false);
    use_context_provider(|| DrawerState(drawer_open));

    rsx! {
        document::Stylesheet {href: asset!("/assets/main.css")}
        Router::<Route> {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use components::primary_app_bar::toggle_drawer;
    use dioxus::history::{History, MemoryHistory};
    use std::rc::Rc;

    fn render_at_root(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app)
            .with_root_context(Rc::new(MemoryHistory::with_initial_path("/")) as Rc<dyn History>);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_root_route_renders_home() {
        #[allow(non_snake_case)]
        fn Routed() -> Element {
            rsx! { Router::<Route> {} }
        }

        let html = render_at_root(Routed);
        assert!(html.contains("style=\"display: flex\""));
        assert!(html.contains("app-bar"));
        assert!(!html.contains("app-drawer"));
    }

    #[test]
    fn test_toggled_drawer_links_home() {
        #[allow(non_snake_case)]
        fn OpenDrawer() -> Element {
            let drawer = use_signal(|| false);
            use_context_provider(|| DrawerState(drawer));
            use_hook(|| toggle_drawer(drawer));
            rsx! { Router::<Route> {} }
        }

        let html = render_at_root(OpenDrawer);
        let drawer = html.find("app-drawer").expect("drawer missing");
        let link = html.find("app-drawer-link").expect("drawer link missing");
        assert!(drawer < link);
        assert!(html[link..].contains("href=\"/\""));
        assert!(html.contains(">Home</a>"));
    }
}
