//! Nodes and split-ratio matrices.

use ctm_core::{LinkId, NodeId, Point};

use crate::error::{TopologyError, TopologyResult};

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// The closed set of node behaviors.
///
/// The variant determines how flows across the node's incident links are
/// resolved each step; the set is fixed and enumerable, so it is a plain enum
/// rather than an open trait.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Ordinary junction: any number of incoming and outgoing links, flows
    /// resolved from demand, supply, and the split-ratio matrix.
    Junction,

    /// Boundary inflow: no incoming links, exactly one outgoing link.
    ///
    /// The configured inflow is injected *uncapped* by the receiving link's
    /// supply; demand exceeding the supply is discarded, not queued.  This
    /// is documented model behavior.
    Source {
        /// Fixed inflow rate, veh/h.
        inflow: f64,
    },

    /// Boundary outflow: exactly one incoming link, no outgoing links.
    /// Infinite receiving capacity — drains the incoming link at its full
    /// sending capacity.
    Sink,
}

// ── SplitMatrix ───────────────────────────────────────────────────────────────

/// Turning-proportion table: rows are incoming links, columns are outgoing
/// links, entry `(i, j)` is the fraction of incoming link `i`'s flow that
/// turns onto outgoing link `j`.  Every row sums to 1.
///
/// Stored row-major in a flat `Vec`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Tolerance for a row's deviation from summing to exactly 1.
const ROW_SUM_EPS: f64 = 1e-9;

impl SplitMatrix {
    /// The uniform split: every incoming link distributes `1/cols` to each
    /// outgoing link.  With `cols == 0` the matrix is empty (sinks).
    pub fn uniform(rows: usize, cols: usize) -> Self {
        let value = if cols > 0 { 1.0 / cols as f64 } else { 0.0 };
        Self { rows, cols, data: vec![value; rows * cols] }
    }

    /// Build from explicit rows, validating rectangularity, entry range, and
    /// row sums.
    pub fn from_rows(rows: &[Vec<f64>]) -> TopologyResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TopologyError::SplitRagged { row: i });
            }
            let mut sum = 0.0;
            for (j, &value) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(TopologyError::SplitEntryRange { row: i, col: j, value });
                }
                sum += value;
            }
            if (sum - 1.0).abs() > ROW_SUM_EPS {
                return Err(TopologyError::SplitRowSum { row: i, sum });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { rows: rows.len(), cols, data })
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Ratio from incoming link index `i` to outgoing link index `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.cols + j]
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A network node: junction, source, or sink.
///
/// `incoming` and `outgoing` hold incident link ids in registration order;
/// the split matrix's rows and columns are indexed in that same order.  Do
/// not construct directly, use [`NetworkBuilder`][crate::NetworkBuilder],
/// which wires the link lists and resolves the split matrix.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub pos: Point,
    pub kind: NodeKind,
    pub incoming: Vec<LinkId>,
    pub outgoing: Vec<LinkId>,
    pub split: SplitMatrix,
}
