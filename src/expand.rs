//! Dissolving a group node back into the nodes it collapsed.
//!
//! Expansion re-anchors the embedded sub-flow at the group's canvas position,
//! merges its nodes and edges into the outer flow, removes the group node and
//! rewires every edge that ended on the group to the internal node field the
//! group port stood for.

use crate::error::ExpandError;
use crate::flow::{Edge, FieldKind, FlowData, Node, Position};
use crate::port::{FieldPortId, OutputPortId, ProxyTarget};
use ahash::AHashSet;

/// What an expansion did to the outer flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub group_id: String,
    /// Ids of the sub-flow nodes now in the outer flow.
    pub nodes: Vec<String>,
    /// Ids of the sub-flow edges now in the outer flow.
    pub edges: Vec<String>,
    /// Ids of the boundary edges after rewiring.
    pub rewired: Vec<String>,
    /// Ids of boundary edges that could not be rewired and were removed.
    pub dropped: Vec<String>,
}

/// Shifts every node of `flow` by `origin`, keeping their relative layout.
pub fn reanchor(flow: &mut FlowData, origin: Position) {
    for node in &mut flow.nodes {
        node.position = node.position + origin;
    }
}

/// Replaces group node `group_id` in `outer` with its sub-flow, anchored at `position`.
///
/// The sub-flow must use ids that do not exist in the outer flow. Nothing is
/// renamed: a collision fails the expansion before anything is modified.
pub fn expand_group(
    outer: &mut FlowData,
    group_id: &str,
    position: Position,
) -> Result<Expansion, ExpandError> {
    let index = outer
        .nodes
        .iter()
        .position(|n| n.id == group_id)
        .ok_or_else(|| ExpandError::NodeNotFound {
            node_id: group_id.to_string(),
        })?;
    let group = &outer.nodes[index];
    let embedded = group.embedded_flow().ok_or_else(|| ExpandError::NotAGroup {
        node_id: group_id.to_string(),
    })?;

    check_disjoint(outer, group_id, &embedded.data)?;

    let mut inner = embedded.data.clone();
    reanchor(&mut inner, position);

    let group = outer.nodes.remove(index);
    let (boundary, kept): (Vec<Edge>, Vec<Edge>) =
        outer.edges.drain(..).partition(|e| e.touches(group_id));
    outer.edges = kept;

    let mut expansion = Expansion {
        group_id: group_id.to_string(),
        nodes: inner.nodes.iter().map(|n| n.id.clone()).collect(),
        edges: inner.edges.iter().map(|e| e.id.clone()).collect(),
        ..Expansion::default()
    };

    let mut rewired = Vec::with_capacity(boundary.len());
    for edge in boundary {
        match rewire(&group, &inner, &edge) {
            Some(new_edge) => {
                log::debug!("Rewired edge '{}' to '{}'", edge.id, new_edge.id);
                expansion.rewired.push(new_edge.id.clone());
                rewired.push(new_edge);
            }
            None => {
                log::warn!(
                    "Edge '{}' on group '{}' has no internal counterpart, removing it",
                    edge.id,
                    group_id
                );
                expansion.dropped.push(edge.id);
            }
        }
    }

    outer.nodes.extend(inner.nodes);
    outer.edges.extend(inner.edges);
    outer.edges.extend(rewired);

    log::info!(
        "Expanded group '{}' into {} nodes and {} edges ({} rewired, {} dropped)",
        group_id,
        expansion.nodes.len(),
        expansion.edges.len(),
        expansion.rewired.len(),
        expansion.dropped.len()
    );
    Ok(expansion)
}

fn check_disjoint(outer: &FlowData, group_id: &str, inner: &FlowData) -> Result<(), ExpandError> {
    let node_ids: AHashSet<&str> = outer
        .nodes
        .iter()
        .filter(|n| n.id != group_id)
        .map(|n| n.id.as_str())
        .collect();
    let edge_ids: AHashSet<&str> = outer
        .edges
        .iter()
        .filter(|e| !e.touches(group_id))
        .map(|e| e.id.as_str())
        .collect();

    let clash = inner
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .find(|id| node_ids.contains(id))
        .or_else(|| {
            inner
                .edges
                .iter()
                .map(|e| e.id.as_str())
                .find(|id| edge_ids.contains(id))
        });

    match clash {
        Some(id) => Err(ExpandError::IdCollision {
            group_id: group_id.to_string(),
            id: id.to_string(),
        }),
        None => Ok(()),
    }
}

fn rewire(group: &Node, inner: &FlowData, edge: &Edge) -> Option<Edge> {
    let (source, source_handle) = if edge.source == group.id {
        rewire_source(group, inner, &edge.source_handle)?
    } else {
        (edge.source.clone(), edge.source_handle.clone())
    };
    let (target, target_handle) = if edge.target == group.id {
        rewire_target(group, inner, &edge.target_handle)?
    } else {
        (edge.target.clone(), edge.target_handle.clone())
    };
    let mut rewired = Edge::new(source, source_handle, target, target_handle);
    rewired.extra = edge.extra.clone();
    Some(rewired)
}

/// Resolves a group input port to the internal node field it proxies.
fn rewire_target(group: &Node, inner: &FlowData, handle: &str) -> Option<(String, String)> {
    let port: FieldPortId = handle
        .parse()
        .map_err(|e| log::warn!("Unreadable target handle '{}': {}", handle, e))
        .ok()?;

    let proxy = port.proxy.clone().or_else(|| {
        group
            .template()
            .get(&port.field)
            .and_then(|d| d.proxy.as_ref())
            .map(ProxyTarget::from)
    })?;
    let node = inner.node(&proxy.node_id)?;

    let type_name = node
        .template()
        .get(&proxy.field)
        .and_then(|d| d.type_name.clone())
        .unwrap_or(port.type_name);
    let handle = FieldPortId::new(type_name, &proxy.field, &node.id).to_string();
    Some((node.id.clone(), handle))
}

/// Resolves a group's right-side port to the internal node producing its value.
fn rewire_source(group: &Node, inner: &FlowData, handle: &str) -> Option<(String, String)> {
    let root_proxy = group
        .template()
        .iter()
        .filter(|f| f.kind == FieldKind::Root)
        .map(|f| FieldPortId::for_field(&f.descriptor, &f.key, &group.id))
        .find(|id| id.to_string() == handle)
        .and_then(|id| id.proxy);

    let node = match root_proxy {
        Some(proxy) => inner.node(&proxy.node_id)?,
        None => {
            if handle != OutputPortId::for_node(group).to_string() {
                log::warn!(
                    "Source handle '{}' is neither a proxied root port nor the output of '{}'",
                    handle,
                    group.id
                );
                return None;
            }
            output_node(group, inner)?
        }
    };
    Some((node.id.clone(), OutputPortId::for_node(node).to_string()))
}

/// The sub-flow node whose output the group exposes.
///
/// Only nodes that feed no other internal node qualify. The one with the
/// group's base classes wins; otherwise there must be exactly one.
fn output_node<'a>(group: &Node, inner: &'a FlowData) -> Option<&'a Node> {
    let sources: AHashSet<&str> = inner.edges.iter().map(|e| e.source.as_str()).collect();
    let terminals: Vec<&Node> = inner
        .nodes
        .iter()
        .filter(|n| !sources.contains(n.id.as_str()))
        .collect();

    terminals
        .iter()
        .find(|n| n.base_classes() == group.base_classes())
        .copied()
        .or_else(|| match terminals.as_slice() {
            [only] => Some(*only),
            _ => None,
        })
}
