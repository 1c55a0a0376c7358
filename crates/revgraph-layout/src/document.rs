//! JSON documents: revision graphs in, layout dumps out.
//!
//! Input nodes reference each other by string id through `next` and `copied_to`; the reverse
//! links (`previous`, `copied_from`) are derived while building the graph.

use crate::error::{Error, Result};
use crate::geometry::GraphLayout;
use crate::graph::{
    EdgeKind, NodeId, RevisionAction, RevisionGraph, RevisionGraphBuilder, RevisionKey,
};
use crate::options::LayoutOptions;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,
    pub revision: u64,
    pub path: String,
    #[serde(default)]
    pub action: RevisionAction,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copied_to: Vec<String>,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build(&self) -> Result<DocumentGraph> {
        let mut builder = RevisionGraphBuilder::new();
        let mut index: IndexMap<String, NodeId, FxBuildHasher> = IndexMap::default();
        for node in &self.nodes {
            let id = builder.add_node(
                RevisionKey::new(node.revision, node.path.clone()),
                node.action,
                node.width,
                node.height,
            );
            if index.insert(node.id.clone(), id).is_some() {
                return Err(Error::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }

        let resolve = |from: &str, id: &str| -> Result<NodeId> {
            index.get(id).copied().ok_or_else(|| Error::UnknownReference {
                from: from.to_string(),
                id: id.to_string(),
            })
        };

        for node in &self.nodes {
            let from = resolve(&node.id, &node.id)?;
            if let Some(next) = &node.next {
                builder.set_next(from, resolve(&node.id, next)?);
            }
            for target in &node.copied_to {
                builder.add_copy(from, resolve(&node.id, target)?);
            }
        }
        if let Some(root) = &self.root {
            builder.set_root(resolve("root", root)?);
        }

        Ok(DocumentGraph {
            graph: builder.build()?,
            ids: index,
        })
    }
}

/// A graph built from a [`GraphDocument`], keeping the document's node ids.
#[derive(Debug, Clone)]
pub struct DocumentGraph {
    pub graph: RevisionGraph,
    // Insertion order matches node order, so the entry at index `n` belongs to `NodeId(n)`.
    ids: IndexMap<String, NodeId, FxBuildHasher>,
}

impl DocumentGraph {
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.ids.get_index(node.index()).map(|(id, _)| id.as_str())
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn layout(&self, options: &LayoutOptions) -> Result<GraphLayout> {
        crate::layout(&self.graph, options)
    }

    pub fn dump(&self, layout: &GraphLayout) -> LayoutDump {
        LayoutDump::from_layout(&self.graph, layout, |id| {
            self.id(id).map_or_else(|| id.to_string(), str::to_string)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub max_y: f64,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDump {
    pub id: String,
    pub revision: u64,
    pub path: String,
    pub action: RevisionAction,
    pub column: usize,
    pub row: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

impl LayoutDump {
    /// Dumps nodes in graph walk order; `label` names each node in the output.
    pub fn from_layout(
        graph: &RevisionGraph,
        layout: &GraphLayout,
        label: impl Fn(NodeId) -> String,
    ) -> Self {
        let nodes = graph
            .walk()
            .iter()
            .map(|&id| {
                let node = &graph[id];
                let geom = &layout[id];
                NodeDump {
                    id: label(id),
                    revision: node.key.revision,
                    path: node.key.path.clone(),
                    action: node.action,
                    column: geom.column,
                    row: geom.row,
                    x: geom.x,
                    y: geom.y,
                    width: geom.width,
                    height: geom.height,
                }
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|e| EdgeDump {
                from: label(e.from),
                to: label(e.to),
                kind: e.kind,
            })
            .collect();

        let bounds = layout.bounds();
        LayoutDump {
            width: bounds.width,
            height: bounds.height,
            max_y: layout.max_y(),
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeDump> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
