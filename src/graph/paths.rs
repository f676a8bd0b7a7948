//! Path enumeration with cycle truncation
//!
//! Enumerates every interesting path starting at the graph's roots using a
//! depth-first traversal. The visited set is scoped to the exploration
//! stack (marked on descend, unmarked on return), so diamonds produce one
//! path per branch while a back-edge is recognized the moment its target is
//! already on the stack. A back-edge is appended to the current path and
//! recursion stops there, which both guarantees termination and hands the
//! cycle-closing edge to the rules.

use std::collections::HashSet;
use tracing::debug;

use super::{CallGraph, Path};

/// Upper bound on edges per enumerated path. Bounds worst-case work on
/// pathological multi-branching graphs; a capped path is emitted as-is.
pub const MAX_PATH_EDGES: usize = 10;

impl CallGraph {
    /// Enumerate all paths from the graph's roots.
    ///
    /// A root is a node that appears as a source but never as a target.
    /// When no such node exists (every weakly-connected component is fully
    /// cyclic), every node with out-edges acts as a root instead. Roots are
    /// visited in lexicographic order; within a node, out-edges are visited
    /// in input order.
    pub fn paths(&self) -> Vec<Path> {
        let roots = self.roots();
        let mut result = Vec::new();

        for root in roots {
            let mut visited: HashSet<&str> = HashSet::new();
            visited.insert(root);
            let mut stack = Vec::new();
            self.dfs(root, &mut visited, &mut stack, &mut result);
        }

        debug!(paths = result.len(), "path enumeration complete");
        result
    }

    fn roots(&self) -> Vec<&str> {
        let targets: HashSet<&str> = self.all_edges().map(|e| e.target.as_str()).collect();
        let mut roots: Vec<&str> = self
            .adjacency()
            .keys()
            .map(String::as_str)
            .filter(|s| !targets.contains(s))
            .collect();
        if roots.is_empty() {
            roots = self.adjacency().keys().map(String::as_str).collect();
        }
        roots.sort_unstable();
        roots
    }

    fn dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        stack: &mut Path,
        result: &mut Vec<Path>,
    ) {
        let out = self.out_edges(node);
        if out.is_empty() {
            // Leaf: record the current path if non-empty.
            if !stack.is_empty() {
                result.push(stack.clone());
            }
            return;
        }

        for edge in out {
            stack.push(edge.clone());
            if visited.contains(edge.target.as_str()) {
                // Back-edge: keep the cycle-closing edge, stop descending.
                result.push(stack.clone());
            } else if stack.len() >= MAX_PATH_EDGES {
                result.push(stack.clone());
            } else {
                visited.insert(&edge.target);
                self.dfs(&edge.target, visited, stack, result);
                visited.remove(edge.target.as_str());
            }
            stack.pop();
        }
    }
}
