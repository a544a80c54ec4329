use std::collections::HashMap;

use markdown::mdast::Node;

/// Link reference definitions (`[id]: url`), keyed by normalized label.
pub type Definitions = HashMap<String, String>;

/// Visitor signal for [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    Stop,
}

/// Depth-first pre-order walk. Returns `Walk::Stop` if the visitor stopped early.
pub fn walk<F>(node: &Node, visit: &mut F) -> Walk
where
    F: FnMut(&Node) -> Walk,
{
    if visit(node) == Walk::Stop {
        return Walk::Stop;
    }
    if let Some(children) = node.children() {
        for child in children {
            if walk(child, visit) == Walk::Stop {
                return Walk::Stop;
            }
        }
    }
    Walk::Continue
}

/// Case-folded label with whitespace runs collapsed.
fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Collect every definition in the document. The first definition of a label wins.
pub fn collect_definitions(root: &Node) -> Definitions {
    let mut defs = Definitions::new();
    walk(root, &mut |n: &Node| {
        if let Node::Definition(d) = n {
            defs.entry(normalize_label(&d.identifier))
                .or_insert_with(|| d.url.clone());
        }
        Walk::Continue
    });
    defs
}

/// Flatten a node to its visible text. Formatting and link wrappers are transparent,
/// inline code is kept verbatim and images contribute their alt text.
pub fn extract_text(node: Option<&Node>) -> String {
    let mut out = String::new();
    if let Some(node) = node {
        walk(node, &mut |n: &Node| {
            match n {
                Node::Text(t) => out.push_str(&t.value),
                Node::InlineCode(c) => out.push_str(&c.value),
                Node::Image(img) => out.push_str(&img.alt),
                _ => {}
            }
            Walk::Continue
        });
    }
    out
}

/// Destination of the first link under `node`, in pre-order. Reference links
/// resolve through `defs`; an unresolved reference is not a link.
pub fn first_link(node: Option<&Node>, defs: &Definitions) -> Option<String> {
    let mut found = None;
    if let Some(node) = node {
        walk(node, &mut |n: &Node| {
            found = match n {
                Node::Link(link) => Some(link.url.clone()),
                Node::LinkReference(r) => defs.get(&normalize_label(&r.identifier)).cloned(),
                _ => None,
            };
            if found.is_some() {
                Walk::Stop
            } else {
                Walk::Continue
            }
        });
    }
    found
}

// ── Tests ──
