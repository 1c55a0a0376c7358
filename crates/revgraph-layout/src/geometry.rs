//! Layout output: a geometry side-table indexed by [`NodeId`].

use crate::graph::{NodeId, RevisionGraph};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeGeometry {
    /// Lane index assigned by the placement pass.
    pub column: usize,
    /// Logical row; grows with history (towards the top of the canvas).
    pub row: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphLayout {
    pub(crate) nodes: Vec<NodeGeometry>,
    pub(crate) max_y: f64,
    pub(crate) bounds: Bounds,
}

impl GraphLayout {
    /// A table with one zeroed entry per node, sizes copied from the graph.
    pub fn for_graph(graph: &RevisionGraph) -> Self {
        let nodes = graph
            .node_ids()
            .map(|id| NodeGeometry {
                width: graph[id].width,
                height: graph[id].height,
                ..Default::default()
            })
            .collect();
        Self {
            nodes,
            max_y: 0.0,
            bounds: Bounds::default(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[NodeGeometry] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tallest column extent found by the packing pass.
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn column_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.column + 1)
            .max()
            .unwrap_or(0)
    }
}

impl std::ops::Index<NodeId> for GraphLayout {
    type Output = NodeGeometry;

    fn index(&self, id: NodeId) -> &NodeGeometry {
        &self.nodes[id.index()]
    }
}

impl std::ops::IndexMut<NodeId> for GraphLayout {
    fn index_mut(&mut self, id: NodeId) -> &mut NodeGeometry {
        &mut self.nodes[id.index()]
    }
}
