use dancehub_auth::PermissionEvaluator;

use super::model::{NavGroup, NavNode};

/// Returns the subset of `nodes` visible to `evaluator`.
///
/// Leaves are kept when their own requirement passes. A group is kept when
/// its requirement passes and at least one child survives filtering.
pub fn filter_navigation(nodes: &[NavNode], evaluator: &PermissionEvaluator<'_>) -> Vec<NavNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, evaluator))
        .collect()
}

fn filter_node(node: &NavNode, evaluator: &PermissionEvaluator<'_>) -> Option<NavNode> {
    if !node.access().menu_allows(evaluator) {
        return None;
    }

    match node {
        NavNode::Item(_) | NavNode::Title(_) => Some(node.clone()),
        NavNode::Group(group) => {
            let children = filter_navigation(&group.children, evaluator);
            if children.is_empty() {
                return None;
            }
            Some(NavNode::Group(NavGroup {
                children,
                ..group.clone()
            }))
        }
    }
}
