//! Hierarchy traversal over the wiki's page/folder tree.
//!
//! Starting from a set of root identifiers, the walker queries the page and
//! folder children of every node and collects the complete reachable set.
//! A visited-set guards against revisits: the wiki hierarchy is expected to
//! be a tree, but cross-links and re-shared children must not cause a node
//! to be expanded twice. Traversal is sequential — one API call in flight
//! at a time — and uses an explicit work stack, so depth is bounded by the
//! frontier size rather than the process stack.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use conflabel_client::{ChildKind, ConfluenceClient};

/// Expand `root` and all of its descendants into `visited`.
///
/// Every identifier is inserted into `visited` *before* its children are
/// queried, so a node reachable from several places within one run has its
/// children listed exactly once. A failed child-listing call is logged and
/// the node is treated as childless; a child record without an identifier
/// is logged and skipped. Neither aborts the walk.
pub async fn expand(client: &ConfluenceClient, root: &str, visited: &mut HashSet<String>) {
    if !visited.insert(root.to_string()) {
        debug!(id = root, "root already visited");
        return;
    }

    let mut stack = vec![root.to_string()];

    while let Some(id) = stack.pop() {
        for kind in [ChildKind::Page, ChildKind::Folder] {
            let records = match client.children(&id, kind).await {
                Ok(records) => records,
                Err(e) => {
                    warn!(id = %id, %kind, error = %e, "child listing failed, treating as childless");
                    continue;
                }
            };

            for record in records {
                match record.id {
                    Some(child) if !child.is_empty() => {
                        if visited.insert(child.clone()) {
                            stack.push(child);
                        }
                    }
                    _ => {
                        warn!(
                            parent = %id,
                            %kind,
                            title = record.title.as_deref().unwrap_or("<untitled>"),
                            "child record without identifier, skipping"
                        );
                    }
                }
            }
        }
    }
}

/// Expand every root into a fresh visited-set and return it.
pub async fn discover(client: &ConfluenceClient, roots: &[String]) -> HashSet<String> {
    let mut visited = HashSet::new();

    for root in roots {
        expand(client, root, &mut visited).await;
    }

    info!(
        roots = roots.len(),
        discovered = visited.len(),
        "hierarchy walk complete"
    );

    visited
}
