#![forbid(unsafe_code)]

//! Lane-based layout for version-control revision graphs.
//!
//! A revision graph holds the revisions of one path: `next` links chain revisions of the same
//! path into a lane, `copied_to` links fan out into copies, branches and renames. [`layout`]
//! gives every revision a column (lane) and a row, packs lanes sharing a column so they never
//! overlap, and turns the result into pixel coordinates with the oldest revision at the bottom.
//!
//! ```
//! use revgraph_layout::{LayoutOptions, RevisionAction, RevisionGraphBuilder, RevisionKey};
//!
//! let mut b = RevisionGraphBuilder::new();
//! let r1 = b.add_node(RevisionKey::new(1, "/trunk/a.c"), RevisionAction::Add, 100.0, 20.0);
//! let r2 = b.add_node(RevisionKey::new(2, "/trunk/a.c"), RevisionAction::Modify, 100.0, 20.0);
//! b.set_next(r1, r2).set_root(r1);
//! let graph = b.build()?;
//!
//! let layout = revgraph_layout::layout(&graph, &LayoutOptions::default())?;
//! assert!(layout[r2].y < layout[r1].y);
//! # Ok::<(), revgraph_layout::Error>(())
//! ```

pub mod column;
pub mod coordinate_system;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod margin;
pub mod options;
pub mod packing;
pub mod pipeline;
pub mod placement;

pub use document::{DocumentGraph, GraphDocument, LayoutDump};
pub use error::{Error, Result};
pub use geometry::{Bounds, GraphLayout, NodeGeometry};
pub use graph::{
    Edge, EdgeKind, NodeId, RevisionAction, RevisionGraph, RevisionGraphBuilder, RevisionKey,
    RevisionNode,
};
pub use options::{LayoutOptions, Margin};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out every node reachable from the graph's root. An empty graph yields an empty layout.
pub fn layout(graph: &RevisionGraph, options: &LayoutOptions) -> Result<GraphLayout> {
    validate_options(options)?;
    Ok(pipeline::layout(graph, options))
}

fn validate_options(options: &LayoutOptions) -> Result<()> {
    let checks = [
        ("vertical_gap", Some(options.vertical_gap)),
        ("column_gap", Some(options.column_gap)),
        ("column_width", options.column_width),
        ("margin.left", Some(options.margin.left)),
        ("margin.top", Some(options.margin.top)),
        ("margin.right", Some(options.margin.right)),
        ("margin.bottom", Some(options.margin.bottom)),
    ];
    for (name, value) in checks {
        if let Some(value) = value {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidOption { name, value });
            }
        }
    }
    Ok(())
}
