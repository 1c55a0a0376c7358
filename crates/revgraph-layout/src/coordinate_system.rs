//! Coordinate finalization.
//!
//! Packed rows grow with history, while the canvas grows downwards. This pass turns columns into
//! pixel X and flips rows so the oldest revision ends up at the bottom.

use crate::geometry::GraphLayout;
use crate::graph::RevisionGraph;
use crate::options::LayoutOptions;

pub fn run(graph: &RevisionGraph, layout: &mut GraphLayout, options: &LayoutOptions) {
    let pitch = column_pitch(graph, options);
    let max_y = layout.max_y;
    for &id in graph.walk() {
        let n = &mut layout[id];
        n.x = n.column as f64 * pitch;
        n.y = max_y - (n.row + n.height);
    }
}

pub fn column_pitch(graph: &RevisionGraph, options: &LayoutOptions) -> f64 {
    let width = options
        .column_width
        .unwrap_or_else(|| graph.max_node_width());
    width + options.column_gap
}
