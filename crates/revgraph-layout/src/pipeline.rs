//! Layout pipeline.
//!
//! Runs placement, packing, coordinate finalization and margins, in that order, over one geometry
//! table. Each pass is a full traversal from the root; none feeds back into an earlier one.

use crate::geometry::GraphLayout;
use crate::graph::RevisionGraph;
use crate::options::LayoutOptions;
use crate::{coordinate_system, margin, packing, placement};

pub fn layout(graph: &RevisionGraph, options: &LayoutOptions) -> GraphLayout {
    let mut out = GraphLayout::for_graph(graph);
    if graph.root().is_none() {
        tracing::debug!("empty revision graph, nothing to lay out");
        margin::run(graph, &mut out, &options.margin);
        return out;
    }

    placement::run(graph, &mut out, options);
    tracing::debug!(
        nodes = graph.node_count(),
        columns = out.column_count(),
        "placement done"
    );

    packing::run(graph, &mut out, options);
    tracing::debug!(max_y = out.max_y, "packing done");

    coordinate_system::run(graph, &mut out, options);
    margin::run(graph, &mut out, &options.margin);
    tracing::debug!(
        width = out.bounds.width,
        height = out.bounds.height,
        "coordinates finalized"
    );

    out
}
