//! Fact lookup over a parsed XBRL instance document.
//!
//! An XBRL instance is flat XML: each fact is an element whose qualified
//! name identifies the concept (e.g., `jpcrp_cor:CompanyNameCoverPage`)
//! and whose `contextRef` attribute scopes it to a reporting period or
//! instant. The layout addresses facts by that (name, context) pair.

use roxmltree::{Document, Node};

/// Qualified name of an element as written in the source: `prefix:local`,
/// or just the local name when the element has no namespace prefix.
#[must_use]
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let local = node.tag_name().name();
    match node
        .tag_name()
        .namespace()
        .and_then(|ns| node.lookup_prefix(ns))
    {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Look up the value of the fact with the given qualified name and context.
///
/// Returns the element's text (trimmed, empty string for an empty element)
/// or `None` when no matching fact exists. The first match in document
/// order wins.
#[must_use]
pub fn find_value(doc: &Document<'_>, key: &str, context_id: &str) -> Option<String> {
    doc.descendants()
        .filter(|n| n.is_element())
        .find(|n| n.attribute("contextRef") == Some(context_id) && qualified_name(*n) == key)
        .map(|n| n.text().unwrap_or_default().trim().to_string())
}
