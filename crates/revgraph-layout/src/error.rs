use crate::graph::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node index {index} is out of bounds (graph has {len} nodes)")]
    UnknownNode { index: usize, len: usize },

    #[error("inconsistent {link} link between nodes {from} and {to}")]
    ConflictingLink {
        link: &'static str,
        from: NodeId,
        to: NodeId,
    },

    #[error("root node {root} must not have a previous revision or a copy source")]
    RootHasPredecessor { root: NodeId },

    #[error("node {node} is not reachable from the root")]
    Unreachable { node: NodeId },

    #[error("node {node} has an invalid size {width}x{height}")]
    InvalidSize {
        node: NodeId,
        width: f64,
        height: f64,
    },

    #[error("graph has {nodes} nodes but no root")]
    MissingRoot { nodes: usize },

    #[error("layout option {name} must be a finite, non-negative number (got {value})")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("duplicate node id in document: {id}")]
    DuplicateId { id: String },

    #[error("node {from} references unknown node id: {id}")]
    UnknownReference { from: String, id: String },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
