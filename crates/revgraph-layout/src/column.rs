//! Per-column bookkeeping for the packing pass.

use crate::graph::NodeId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnData {
    /// Largest `row + height` committed to this column, `None` while nothing was committed.
    pub top: Option<f64>,
    pub current_bottom: f64,
    pub current_top: f64,
    /// Nodes registered during the current batch, bottom to top.
    pub current_nodes: Vec<NodeId>,
}

impl ColumnData {
    fn register(&mut self, id: NodeId, row: f64, height: f64) {
        if self.current_nodes.is_empty() {
            self.current_bottom = row;
            self.current_top = row + height;
        } else {
            self.current_bottom = self.current_bottom.min(row);
            self.current_top = self.current_top.max(row + height);
        }
        self.current_nodes.push(id);
    }

    /// How far the current batch has to move up to keep `gap` above the committed nodes.
    /// Negative when it already clears them.
    pub fn overlap(&self, gap: f64) -> Option<f64> {
        self.top.map(|top| top + gap - self.current_bottom)
    }

    pub fn bottom_node(&self) -> Option<NodeId> {
        self.current_nodes.first().copied()
    }

    fn commit(&mut self, shift: f64) {
        let batch_top = self.current_top + shift;
        self.top = Some(self.top.map_or(batch_top, |top| top.max(batch_top)));
        self.current_nodes.clear();
        self.current_bottom = 0.0;
        self.current_top = 0.0;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnTracker {
    columns: Vec<ColumnData>,
    touched: Vec<usize>,
}

impl ColumnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, column: usize, id: NodeId, row: f64, height: f64) {
        if column >= self.columns.len() {
            self.columns.resize_with(column + 1, ColumnData::default);
        }
        let data = &mut self.columns[column];
        if data.current_nodes.is_empty() {
            self.touched.push(column);
        }
        data.register(id, row, height);
    }

    /// Columns that received nodes in the current batch, in first-touch order.
    pub fn touched(&self) -> impl Iterator<Item = (usize, &ColumnData)> + '_ {
        self.touched.iter().map(|&c| (c, &self.columns[c]))
    }

    /// Moves every touched column's batch up by `shift` and starts a new batch.
    pub fn commit(&mut self, shift: f64) {
        for column in self.touched.drain(..) {
            self.columns[column].commit(shift);
        }
    }

    pub fn column(&self, column: usize) -> Option<&ColumnData> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn max_y(&self) -> f64 {
        self.columns
            .iter()
            .filter_map(|c| c.top)
            .fold(0.0, f64::max)
    }
}
