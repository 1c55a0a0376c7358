//! Outer margin.
//!
//! Offsets every node by the left/top margin and records the canvas size, including the
//! right/bottom margin. Applying it twice would shift twice; the pipeline runs it once.

use crate::geometry::{Bounds, GraphLayout};
use crate::graph::RevisionGraph;
use crate::options::Margin;

pub fn run(graph: &RevisionGraph, layout: &mut GraphLayout, margin: &Margin) {
    let mut right: f64 = 0.0;
    let mut bottom: f64 = 0.0;
    for &id in graph.walk() {
        let n = &mut layout[id];
        n.x += margin.left;
        n.y += margin.top;
        right = right.max(n.x + n.width);
        bottom = bottom.max(n.y + n.height);
    }

    let (right, bottom) = if graph.walk().is_empty() {
        (margin.left, margin.top)
    } else {
        (right, bottom)
    };
    layout.bounds = Bounds {
        width: right + margin.right,
        height: bottom + margin.bottom,
    };
}
