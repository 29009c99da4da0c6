/// CSS `display` values a layout container can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Flex => "flex",
        }
    }
}

/// Declarative description of a page before it is handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Container { display: Display, children: Vec<Node> },
    StyleReset,
    AppBar,
    Text(&'static str),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Inline style of a container, `None` for leaves.
    pub fn style(&self) -> Option<String> {
        match self {
            Node::Container { display, .. } => Some(format!("display: {}", display.as_css())),
            _ => None,
        }
    }
}

pub const HOME_TEXT: &str = "Home";

/// The Home page: a flex row holding the baseline reset, the app bar and the page label.
pub fn home_tree() -> Node {
    Node::Container {
        display: Display::Flex,
        children: vec![Node::StyleReset, Node::AppBar, Node::Text(HOME_TEXT)],
    }
}
