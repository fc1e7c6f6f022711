use crate::{
    access::can_access,
    models::{NavigationItem, NavigationNode},
    route_table::RouteTable,
};

/// filter_navigation
///
/// Prunes a sidebar tree down to what `role` may see.
///
/// * A child survives iff its `href` resolves to a route the role can access.
///   Children without an `href`, or pointing at unknown URLs, are dropped.
/// * A group header (no `href`) survives iff at least one child survives.
/// * A linked parent survives iff its own route is accessible or at least one
///   child survives. When only the children keep it alive, its `href` is
///   removed so the sidebar never links to a denied page.
///
/// Excluded entries are absent from the output rather than disabled. The
/// function is pure, so re-filtering its output with the same role is a no-op.
pub fn filter_navigation(
    tree: &[NavigationNode],
    table: &RouteTable,
    role: Option<&str>,
) -> Vec<NavigationNode> {
    tree.iter()
        .filter_map(|node| filter_node(node, table, role))
        .collect()
}

fn filter_node(
    node: &NavigationNode,
    table: &RouteTable,
    role: Option<&str>,
) -> Option<NavigationNode> {
    let children: Vec<NavigationItem> = node
        .children
        .iter()
        .filter(|child| href_visible(child.href.as_deref(), table, role))
        .cloned()
        .collect();

    let href = node
        .href
        .as_deref()
        .filter(|href| href_visible(Some(*href), table, role))
        .map(str::to_string);

    if href.is_none() && children.is_empty() {
        tracing::trace!(label = %node.label, "navigation entry hidden");
        return None;
    }

    Some(NavigationNode {
        label: node.label.clone(),
        href,
        children,
    })
}

// Unknown URLs are never shown.
fn href_visible(href: Option<&str>, table: &RouteTable, role: Option<&str>) -> bool {
    match href.and_then(|href| table.find_by_url(href)) {
        Some(route) => can_access(route, role),
        None => false,
    }
}
