//! FILENAME: engine/src/dependency_graph.rs
//! PURPOSE: Tracks which cells a formula reads (`references`) and which
//! formulas read a given cell (`dependants`), rejecting edits that would
//! introduce a cycle and computing which cells need their formula cache
//! purged after an accepted edit.
//! CONTEXT: The graph stores only `Position` keys, never cell handles — it
//! has no knowledge of `Cell`/`Sheet`. `Sheet::set_cell`/`clear_cell` apply
//! the `Vec<Position>` this returns to the cells in its own table.

use parser::Position;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A proposed formula would have closed a cycle in the references graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependencyError {
    /// The cycle, in traversal order, starting and ending at the same
    /// position.
    pub cycle: Vec<Position>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.cycle.iter().map(|p| p.to_a1()).collect();
        write!(f, "circular dependency: {}", path.join(" -> "))
    }
}

impl std::error::Error for CircularDependencyError {}

/// Forward (`references`) and reverse (`dependants`) adjacency over
/// `Position`, maintained as a consistent pair: `q ∈ references[p] ⇔ p ∈
/// dependants[q]` holds after every accepted `update_cell`.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    references: HashMap<Position, HashSet<Position>>,
    dependants: HashMap<Position, HashSet<Position>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    /// Tentatively installs `new_refs` as `pos`'s out-edges, rejects the
    /// change if it would create a cycle (restoring the prior edge set and
    /// leaving `dependants` untouched), and otherwise updates the reverse
    /// edges and returns every position whose formula cache must be purged:
    /// the transitive closure of `pos`'s dependants, including `pos` itself.
    pub fn update_cell(
        &mut self,
        pos: Position,
        new_refs: &[Position],
    ) -> Result<Vec<Position>, CircularDependencyError> {
        let old_refs = self.references.get(&pos).cloned().unwrap_or_default();
        let new_set: HashSet<Position> = new_refs.iter().copied().collect();

        self.references.insert(pos, new_set.clone());

        if let Some(cycle) = self.find_cycle_from(pos) {
            if old_refs.is_empty() {
                self.references.remove(&pos);
            } else {
                self.references.insert(pos, old_refs);
            }
            return Err(CircularDependencyError { cycle });
        }

        for q in old_refs.difference(&new_set) {
            if let Some(set) = self.dependants.get_mut(q) {
                set.remove(&pos);
            }
        }
        for q in new_set.difference(&old_refs) {
            self.dependants.entry(*q).or_default().insert(pos);
        }

        Ok(self.transitive_dependants(pos))
    }

    /// Positions `pos`'s formula directly reads. Empty if `pos` has none.
    pub fn references_of(&self, pos: Position) -> Vec<Position> {
        self.references
            .get(&pos)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Positions whose formulas directly read `pos`.
    pub fn dependants_of(&self, pos: Position) -> Vec<Position> {
        self.dependants
            .get(&pos)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Depth-first cycle check over `references`, starting at `pos`,
    /// visiting only the component reachable from it (the rest of the graph
    /// is acyclic by induction on prior accepted updates). Iterative with an
    /// explicit stack to avoid recursion depth limits on deep chains. Nodes
    /// are tagged in-progress while on the current path and done once fully
    /// explored; an edge into an in-progress node is the cycle.
    fn find_cycle_from(&self, start: Position) -> Option<Vec<Position>> {
        let mut marks: HashMap<Position, Mark> = HashMap::new();
        let mut stack: Vec<(Position, usize)> = vec![(start, 0)];
        let mut path: Vec<Position> = vec![start];
        marks.insert(start, Mark::InProgress);

        while let Some(&(node, next_idx)) = stack.last() {
            let neighbor = self
                .references
                .get(&node)
                .and_then(|set| set.iter().nth(next_idx).copied());

            match neighbor {
                Some(next) => {
                    stack.last_mut().unwrap().1 += 1;
                    match marks.get(&next) {
                        Some(Mark::InProgress) => {
                            let cycle_start = path.iter().position(|&p| p == next).unwrap();
                            let mut cycle: Vec<Position> = path[cycle_start..].to_vec();
                            cycle.push(next);
                            return Some(cycle);
                        }
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(next, Mark::InProgress);
                            path.push(next);
                            stack.push((next, 0));
                        }
                    }
                }
                None => {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                    path.pop();
                }
            }
        }

        None
    }

    /// Iterative depth-first traversal over `dependants`, collecting `pos`
    /// and everything transitively reachable from it, each exactly once.
    fn transitive_dependants(&self, pos: Position) -> Vec<Position> {
        let mut visited: HashSet<Position> = HashSet::new();
        let mut stack = vec![pos];
        let mut order = Vec::new();
        visited.insert(pos);

        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(deps) = self.dependants.get(&node) {
                for &d in deps {
                    if visited.insert(d) {
                        stack.push(d);
                    }
                }
            }
        }

        order
    }
}
