//! Initial placement.
//!
//! Assigns every node a column and a lane-relative row. Lanes are expanded breadth-first from the
//! root; rows only account for the node's own ancestry, so unrelated lanes sharing a column may
//! still overlap afterwards (the packing pass resolves that).

use crate::geometry::GraphLayout;
use crate::graph::{NodeId, RevisionGraph};
use crate::options::LayoutOptions;
use std::collections::VecDeque;

pub fn run(graph: &RevisionGraph, layout: &mut GraphLayout, options: &LayoutOptions) {
    let Some(root) = graph.root() else {
        return;
    };

    layout[root].column = 0;
    layout[root].row = 0.0;

    let mut queue: VecDeque<NodeId> = VecDeque::from([root]);
    while let Some(lane_head) = queue.pop_front() {
        let mut cur = Some(lane_head);
        while let Some(id) = cur {
            let node = &graph[id];
            let column = layout[id].column;
            let child_row = layout[id].row + node.height + options.vertical_gap;

            // Only non-rename copy targets open new lanes.
            let mut last_column = column;
            for &child in &node.copied_to {
                layout[child].column = if graph.is_rename_target(child) {
                    column
                } else {
                    last_column += 1;
                    last_column
                };
                layout[child].row = child_row;
                queue.push_back(child);
            }

            if let Some(next) = node.next {
                layout[next].column = column;
                layout[next].row = child_row;
            }
            cur = node.next;
        }
    }
}
