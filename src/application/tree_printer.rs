use colored::Colorize;
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::listing::ListingError;
use crate::tree::{DisplayItem, Node, NodeKind, TreeProvider};

const INDENT: &str = "  ";
const EXPANDED_MARKER: &str = "▾ ";
const COLLAPSED_MARKER: &str = "▸ ";
const LEAF_MARKER: &str = "  ";

/// Renders the provider's tree as indented lines, expanding folders up to
/// `max_depth` levels below the roots.
pub struct TreePrinter {
    max_depth: usize,
    colorize: bool,
}

impl TreePrinter {
    pub fn new(max_depth: usize, colorize: bool) -> Self {
        Self {
            max_depth,
            colorize,
        }
    }

    pub async fn render(&self, provider: &TreeProvider) -> Vec<String> {
        let mut lines = Vec::new();
        match provider.children(None).await {
            Ok(roots) => {
                for root in roots.iter() {
                    self.render_node(provider, root.clone(), 0, &mut lines).await;
                }
            }
            Err(error) => lines.push(self.paint_error(&error)),
        }
        lines
    }

    fn render_node<'a>(
        &'a self,
        provider: &'a TreeProvider,
        node: Node,
        depth: usize,
        lines: &'a mut Vec<String>,
    ) -> LocalBoxFuture<'a, ()> {
        async move {
            let item = provider.display_item(&node);
            let indent = INDENT.repeat(depth);
            let expand = item.is_expandable() && depth < self.max_depth;
            let marker = match (item.is_expandable(), expand) {
                (true, true) => EXPANDED_MARKER,
                (true, false) => COLLAPSED_MARKER,
                _ => LEAF_MARKER,
            };
            lines.push(format!("{indent}{marker}{}", self.paint(&item)));
            if !expand {
                return;
            }

            let child_indent = INDENT.repeat(depth + 2);
            match provider.children(Some(&node)).await {
                Ok(children) if children.is_empty() => {
                    lines.push(format!("{child_indent}{}", self.paint_note("(empty)")));
                }
                Ok(children) => {
                    for child in children.iter() {
                        self.render_node(provider, child.clone(), depth + 1, &mut *lines)
                            .await;
                    }
                }
                Err(error) => {
                    lines.push(format!("{child_indent}{}", self.paint_error(&error)));
                }
            }
        }
        .boxed_local()
    }

    fn paint(&self, item: &DisplayItem) -> String {
        if !self.colorize {
            return item.label.clone();
        }
        match item.context {
            NodeKind::Connection => item.label.cyan().bold().to_string(),
            NodeKind::Folder => item.label.blue().bold().to_string(),
            NodeKind::File => item.label.normal().to_string(),
            NodeKind::Message => item.label.dimmed().italic().to_string(),
        }
    }

    fn paint_note(&self, note: &str) -> String {
        if self.colorize {
            note.dimmed().to_string()
        } else {
            note.to_string()
        }
    }

    fn paint_error(&self, error: &ListingError) -> String {
        let text = format!("error: {error}");
        if self.colorize {
            text.red().to_string()
        } else {
            text
        }
    }
}
