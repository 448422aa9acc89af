//! Format the whole namespace as a table for the `debug` command.

use crate::namespace::Namespace;
use crate::tree::NodeKind;
use crate::types::Timestamp;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn format_time(timestamp: Timestamp) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Every node with its type, size and timestamps, parents first.
pub fn format_namespace_table(namespace: &Namespace) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Namespace")));
    out.push_str(&format!("  Current directory: {}\n", namespace.cwd()));
    out.push_str(&format!("  Home: {}\n", namespace.home()));
    out.push_str(&format!("  Nodes: {}\n\n", namespace.tree().len()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Type", "Size", "Created", "Modified"]);
    for (path, node) in namespace.nodes() {
        let (kind, size) = match node.kind() {
            NodeKind::Directory(dir) => ("dir", dir.children().count().to_string()),
            NodeKind::File(file) => ("file", file.content().len().to_string()),
        };
        table.add_row(vec![
            path,
            kind.to_string(),
            size,
            format_time(node.created()),
            format_time(node.modified()),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
