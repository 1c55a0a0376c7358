//! Row packing.
//!
//! Walks the graph depth-first, rightmost copy target first, collecting the nodes of one lane run
//! into a batch. When a run ends, the batch is reconciled against everything committed to the
//! columns it touched: the whole batch moves up by the largest overlap found, so every column
//! keeps its nodes stacked without collisions.

use crate::column::ColumnTracker;
use crate::geometry::GraphLayout;
use crate::graph::{NodeId, RevisionAction, RevisionGraph};
use crate::options::LayoutOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Register the node and keep walking its lane.
    Continue(NodeId),
    /// A run ended at this node; walk back to the closest unresolved node.
    ResumeParent(NodeId),
    /// The copy target at index `finished` of `source` is done; copy targets are taken right to
    /// left, then the source's own lane continues.
    ResumeSibling { source: NodeId, finished: usize },
}

struct Packer<'a> {
    graph: &'a RevisionGraph,
    layout: &'a mut GraphLayout,
    gap: f64,
    columns: ColumnTracker,
    batch: Vec<NodeId>,
    // Shift inherited by the current batch from the node it hangs off.
    base_shift: f64,
    // Total upward shift applied to each node so far.
    shift: Vec<f64>,
}

pub fn run(graph: &RevisionGraph, layout: &mut GraphLayout, options: &LayoutOptions) {
    let Some(root) = graph.root() else {
        return;
    };

    let mut packer = Packer {
        graph,
        layout,
        gap: options.vertical_gap,
        columns: ColumnTracker::new(),
        batch: Vec::new(),
        base_shift: 0.0,
        shift: vec![0.0; graph.node_count()],
    };

    let mut step = Step::Continue(root);
    loop {
        step = match step {
            Step::Continue(id) => packer.register(id),
            Step::ResumeParent(id) => {
                let node = &graph[id];
                if let Some(previous) = node.previous {
                    // A lane successor is visited after all copy targets of its predecessor.
                    Step::ResumeParent(previous)
                } else if let Some(source) = node.copied_from {
                    let finished = graph[source]
                        .copied_to
                        .iter()
                        .position(|&c| c == id)
                        .unwrap_or(0);
                    Step::ResumeSibling { source, finished }
                } else {
                    break;
                }
            }
            Step::ResumeSibling { source, finished } => {
                let node = &graph[source];
                if finished > 0 {
                    Step::Continue(node.copied_to[finished - 1])
                } else if let Some(next) = node.next {
                    Step::Continue(next)
                } else {
                    Step::ResumeParent(source)
                }
            }
        };
    }

    packer.layout.max_y = packer.columns.max_y();
    tracing::trace!(
        columns = packer.columns.len(),
        max_y = packer.layout.max_y,
        "row packing done"
    );
}

impl Packer<'_> {
    fn register(&mut self, id: NodeId) -> Step {
        let graph = self.graph;
        let node = &graph[id];
        if self.batch.is_empty() {
            self.base_shift = node.predecessor().map_or(0.0, |p| self.shift[p.index()]);
        }

        let geometry = &mut self.layout[id];
        geometry.row += self.base_shift;
        self.columns.register(geometry.column, id, geometry.row, geometry.height);
        self.batch.push(id);

        // Rename continuations and branch points both follow the rightmost copy target first.
        if let Some(&rightmost) = node.copied_to.last() {
            Step::Continue(rightmost)
        } else if let Some(next) = node.next {
            Step::Continue(next)
        } else {
            self.reconcile();
            Step::ResumeParent(id)
        }
    }

    fn reconcile(&mut self) {
        let mut max_diff = 0.0_f64;
        let mut height_offset = 0.0;
        for (_, column) in self.columns.touched() {
            let Some(diff) = column.overlap(self.gap) else {
                continue;
            };
            if diff > max_diff {
                max_diff = diff;
                height_offset = column
                    .bottom_node()
                    .map_or(0.0, |bottom| floating_start_offset(self.graph, bottom));
            }
        }

        let delta = max_diff + height_offset;
        for &id in &self.batch {
            self.layout[id].row += delta;
            self.shift[id.index()] = self.base_shift + delta;
        }
        tracing::trace!(
            nodes = self.batch.len(),
            columns = self.columns.touched().count(),
            shift = delta,
            "reconciled batch"
        );
        self.columns.commit(delta);
        self.batch.clear();
    }
}

/// Extra spacing for a branch start pushed up past other lanes, so it does not sit right on top
/// of unrelated nodes below its copy source: the height of that source. Renames are exempt.
fn floating_start_offset(graph: &RevisionGraph, id: NodeId) -> f64 {
    let node = &graph[id];
    if node.previous.is_some() || graph.is_rename_target(id) {
        return 0.0;
    }
    match node.copied_from {
        Some(source) if graph[source].action != RevisionAction::Rename => graph[source].height,
        _ => 0.0,
    }
}
