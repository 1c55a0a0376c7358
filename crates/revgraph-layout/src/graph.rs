//! Revision graph model.
//!
//! Nodes live in an arena and reference each other by [`NodeId`]. The topology (`next`,
//! `previous`, `copied_from`, `copied_to`) is fixed once [`RevisionGraphBuilder::build`] succeeds;
//! layout results are written to a separate side-table (see [`crate::geometry`]).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionKey {
    pub revision: u64,
    pub path: String,
}

impl RevisionKey {
    pub fn new(revision: u64, path: impl Into<String>) -> Self {
        Self {
            revision,
            path: path.into(),
        }
    }
}

impl fmt::Display for RevisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.revision)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionAction {
    Add,
    #[default]
    Modify,
    Delete,
    Replace,
    Rename,
    Copy,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevisionNode {
    pub key: RevisionKey,
    pub action: RevisionAction,
    pub width: f64,
    pub height: f64,
    pub next: Option<NodeId>,
    pub previous: Option<NodeId>,
    pub copied_from: Option<NodeId>,
    pub copied_to: Vec<NodeId>,
}

impl RevisionNode {
    fn new(key: RevisionKey, action: RevisionAction, width: f64, height: f64) -> Self {
        Self {
            key,
            action,
            width,
            height,
            next: None,
            previous: None,
            copied_from: None,
            copied_to: Vec::new(),
        }
    }

    /// The node this one hangs off: its lane predecessor or its copy source.
    pub fn predecessor(&self) -> Option<NodeId> {
        self.previous.or(self.copied_from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Next,
    Copy,
    Rename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default)]
pub struct RevisionGraph {
    nodes: Vec<RevisionNode>,
    root: Option<NodeId>,
    // Breadth-first order over `next` and `copied_to`, starting at the root.
    walk: Vec<NodeId>,
}

impl RevisionGraph {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&RevisionNode> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// All nodes in breadth-first order from the root. Every node of a built graph appears
    /// exactly once.
    pub fn walk(&self) -> &[NodeId] {
        &self.walk
    }

    pub fn find(&self, key: &RevisionKey) -> Option<NodeId> {
        self.nodes.iter().position(|n| &n.key == key).map(NodeId)
    }

    /// Whether `id` was renamed from its copy source. Renames keep the source's column.
    pub fn is_rename_target(&self, id: NodeId) -> bool {
        let node = &self[id];
        node.copied_from.is_some() && node.action == RevisionAction::Rename
    }

    /// Edges in walk order: lane successor first, then copy targets in list order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::new();
        for &id in &self.walk {
            let node = &self[id];
            if let Some(next) = node.next {
                out.push(Edge {
                    from: id,
                    to: next,
                    kind: EdgeKind::Next,
                });
            }
            for &target in &node.copied_to {
                let kind = if self.is_rename_target(target) {
                    EdgeKind::Rename
                } else {
                    EdgeKind::Copy
                };
                out.push(Edge {
                    from: id,
                    to: target,
                    kind,
                });
            }
        }
        out
    }

    pub fn max_node_width(&self) -> f64 {
        self.nodes.iter().map(|n| n.width).fold(0.0, f64::max)
    }

    fn validate(&mut self) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            let sizes_ok = node.width.is_finite()
                && node.height.is_finite()
                && node.width >= 0.0
                && node.height >= 0.0;
            if !sizes_ok {
                return Err(Error::InvalidSize {
                    node: NodeId(index),
                    width: node.width,
                    height: node.height,
                });
            }
            if node.previous.is_some() && node.copied_from.is_some() {
                return Err(Error::ConflictingLink {
                    link: "predecessor",
                    from: node.previous.unwrap_or(NodeId(index)),
                    to: NodeId(index),
                });
            }
        }

        let Some(root) = self.root else {
            if self.nodes.is_empty() {
                return Ok(());
            }
            return Err(Error::MissingRoot {
                nodes: self.nodes.len(),
            });
        };
        if root.0 >= self.nodes.len() {
            return Err(Error::UnknownNode {
                index: root.0,
                len: self.nodes.len(),
            });
        }
        if self[root].predecessor().is_some() {
            return Err(Error::RootHasPredecessor { root });
        }

        // Every node has at most one predecessor, so the forward closure of the root must be a
        // tree.
        let mut seen = vec![false; self.nodes.len()];
        let mut walk = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([root]);
        seen[root.0] = true;
        while let Some(id) = queue.pop_front() {
            walk.push(id);
            let node = &self.nodes[id.0];
            for child in node.next.iter().chain(node.copied_to.iter()) {
                if seen[child.0] {
                    return Err(Error::ConflictingLink {
                        link: "predecessor",
                        from: id,
                        to: *child,
                    });
                }
                seen[child.0] = true;
                queue.push_back(*child);
            }
        }
        if let Some(index) = seen.iter().position(|s| !s) {
            return Err(Error::Unreachable {
                node: NodeId(index),
            });
        }

        self.walk = walk;
        Ok(())
    }
}

impl std::ops::Index<NodeId> for RevisionGraph {
    type Output = RevisionNode;

    fn index(&self, id: NodeId) -> &RevisionNode {
        &self.nodes[id.0]
    }
}

#[derive(Debug, Clone, Copy)]
enum Link {
    Next(NodeId, NodeId),
    Copy(NodeId, NodeId),
}

/// Assembles a [`RevisionGraph`]. Links are checked and wired in [`RevisionGraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct RevisionGraphBuilder {
    nodes: Vec<RevisionNode>,
    links: Vec<Link>,
    root: Option<NodeId>,
}

impl RevisionGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        key: RevisionKey,
        action: RevisionAction,
        width: f64,
        height: f64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(RevisionNode::new(key, action, width, height));
        id
    }

    /// Makes `to` the next revision of the same path after `from`.
    pub fn set_next(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.links.push(Link::Next(from, to));
        self
    }

    /// Appends `to` to the copy targets of `from`. Call order defines the child order.
    pub fn add_copy(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.links.push(Link::Copy(from, to));
        self
    }

    pub fn set_root(&mut self, root: NodeId) -> &mut Self {
        self.root = Some(root);
        self
    }

    pub fn build(self) -> Result<RevisionGraph> {
        let mut nodes = self.nodes;
        let len = nodes.len();
        let check = |id: NodeId| -> Result<usize> {
            if id.0 < len {
                Ok(id.0)
            } else {
                Err(Error::UnknownNode { index: id.0, len })
            }
        };

        for link in self.links {
            match link {
                Link::Next(from, to) => {
                    let (f, t) = (check(from)?, check(to)?);
                    let conflict = f == t
                        || nodes[f].next.is_some_and(|n| n != to)
                        || nodes[t].previous.is_some_and(|p| p != from);
                    if conflict {
                        return Err(Error::ConflictingLink {
                            link: "next",
                            from,
                            to,
                        });
                    }
                    nodes[f].next = Some(to);
                    nodes[t].previous = Some(from);
                }
                Link::Copy(from, to) => {
                    let (f, t) = (check(from)?, check(to)?);
                    let conflict = f == t
                        || nodes[t].copied_from.is_some()
                        || nodes[f].copied_to.contains(&to);
                    if conflict {
                        return Err(Error::ConflictingLink {
                            link: "copy",
                            from,
                            to,
                        });
                    }
                    nodes[f].copied_to.push(to);
                    nodes[t].copied_from = Some(from);
                }
            }
        }

        let mut graph = RevisionGraph {
            nodes,
            root: self.root,
            walk: Vec::new(),
        };
        graph.validate()?;
        Ok(graph)
    }
}
