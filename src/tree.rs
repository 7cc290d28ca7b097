//! Renders a marshaled forest as a `tree`-style listing.

use crate::types::FsTree;

/// Builds a visual tree string from a forest.
///
/// Every root starts at column zero; children are drawn with box characters similar to
/// the `tree` command. Directories carry a trailing `/` and each line ends with the id.
pub fn render_forest(forest: &[FsTree]) -> String {
    let mut lines = Vec::new();
    for root in forest {
        lines.push(label(root));
        let mut stack = Vec::new();
        push_children(&mut stack, &root.nodes, "");
        while let Some((node, prefix, last)) = stack.pop() {
            let branch = if last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, branch, label(node)));
            let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
            push_children(&mut stack, &node.nodes, &next);
        }
    }
    lines.join("\n")
}

// Pushed in reverse so the first child is rendered first.
fn push_children<'a>(
    stack: &mut Vec<(&'a FsTree, String, bool)>,
    nodes: &'a [FsTree],
    prefix: &str,
) {
    for (i, node) in nodes.iter().enumerate().rev() {
        stack.push((node, prefix.to_string(), i + 1 == nodes.len()));
    }
}

fn label(node: &FsTree) -> String {
    let slash = if node.is_dir { "/" } else { "" };
    format!("{}{}  # {}", node.name, slash, node.id)
}
