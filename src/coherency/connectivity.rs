//! Graph reachability over a precomputed adjacency relation
//!
//! The coherency engine builds the adjacency from pairwise distance checks;
//! this module only answers whether the resulting graph is one piece.

use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

/// True iff every node is reachable from the first one, i.e. the adjacency
/// graph forms a single connected component. Zero or one nodes are trivially
/// connected. Does no distance math of its own.
pub fn is_single_connected_component<K: Eq + Hash + Clone>(
    nodes: &[K],
    adjacency: &AHashMap<K, AHashSet<K>>,
) -> bool {
    if nodes.len() <= 1 {
        return true;
    }

    let mut visited: AHashSet<K> = AHashSet::new();
    let mut stack = vec![nodes[0].clone()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        if let Some(neighbors) = adjacency.get(&node) {
            for neighbor in neighbors {
                if !visited.contains(neighbor) {
                    stack.push(neighbor.clone());
                }
            }
        }
    }

    nodes.iter().all(|n| visited.contains(n))
}
