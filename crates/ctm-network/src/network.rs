//! Network container and builder.
//!
//! # Construction order
//!
//! Nodes first, then links, then (optionally) turning ratios, then
//! [`NetworkBuilder::build`].  The order matters: a split-ratio matrix's
//! shape is `(incoming, outgoing)` link counts, which are only final once
//! every link is registered, so shape validation is deferred to `build()`.
//!
//! # Diagnostics
//!
//! Conditions worth surfacing that are not errors — currently only "node had
//! no explicit turning ratios, the uniform default was applied" — are
//! returned from `build()` as [`BuildDiagnostic`] values.  The core never
//! logs; the caller decides whether to print, collect, or ignore them.

use std::fmt;

use ctm_core::{DomainError, FundamentalDiagram, LinkId, NodeId, Point};

use crate::error::{TopologyError, TopologyResult};
use crate::link::Link;
use crate::node::{Node, NodeKind, SplitMatrix};

// ── BuildDiagnostic ───────────────────────────────────────────────────────────

/// Non-fatal condition noticed during [`NetworkBuilder::build`].
#[derive(Clone, Debug, PartialEq)]
pub enum BuildDiagnostic {
    /// A junction with incident links on both sides had no explicit
    /// split-ratio matrix; the uniform split was applied.
    DefaultSplitApplied { node: NodeId },
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildDiagnostic::DefaultSplitApplied { node } => {
                write!(f, "no turning ratios for {node}, assuming uniform split")
            }
        }
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// The full road network: all nodes and links, in insertion order.
///
/// Insertion order is iteration order, so a step over the network is fully
/// deterministic.  Structure (node kinds, link endpoints, lengths, split
/// matrices) is fixed after `build()`; during a run only link densities and
/// transient flow slots change.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Network {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // ── Read access (the renderer boundary) ───────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    // ── Mutable access for the driver ─────────────────────────────────────
    //
    // Densities and source inflows are legitimate run-time inputs (initial
    // conditions, time-varying demand).  Structural fields — endpoints,
    // lengths, link lists, matrix shapes — must not change after build().

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Split borrow for the resolution pass: read-only nodes alongside
    /// mutable links, so per-node resolution can write link flow slots while
    /// the topology stays borrowed immutably.
    pub fn nodes_and_links_mut(&mut self) -> (&[Node], &mut [Link]) {
        (&self.nodes, &mut self.links)
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    /// Total vehicles on the network (Σ density × length).
    pub fn total_vehicles(&self) -> f64 {
        self.links.iter().map(Link::vehicles).sum()
    }

    /// The kinematic stability bound on the step size:
    /// `min over links of length / max(free_flow_speed, congestion_wave_speed)`,
    /// in hours.  Steps no larger than this keep every density within
    /// `[0, jam_density]`.  Returns `None` for a network with no links.
    ///
    /// Advisory only — nothing in the update law enforces it.
    pub fn max_stable_step_hours(&self) -> Option<f64> {
        self.links
            .iter()
            .map(|l| {
                let fd = l.fd();
                l.length_km() / fd.free_flow_speed().max(fd.congestion_wave_speed())
            })
            .min_by(f64::total_cmp)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ctm_core::{FundamentalDiagram, Point};
/// use ctm_network::NetworkBuilder;
///
/// let fd = FundamentalDiagram::new(1800.0, 33.7, 6.9).unwrap();
/// let mut b = NetworkBuilder::new();
/// let source = b.add_source(Point::new(0.0, 0.0), 1200.0);
/// let sink = b.add_sink(Point::new(2.0, 0.0));
/// b.add_link(source, sink, fd, 10.0).unwrap();
/// let (net, diagnostics) = b.build().unwrap();
/// assert_eq!(net.link_count(), 1);
/// assert!(diagnostics.is_empty());
/// assert!((net.link(ctm_core::LinkId(0)).length_km() - 2.0).abs() < 1e-12);
/// ```
pub struct NetworkBuilder {
    nodes: Vec<(Point, NodeKind)>,
    links: Vec<RawLink>,
    splits: Vec<Option<SplitMatrix>>,
}

struct RawLink {
    from: NodeId,
    to: NodeId,
    fd: FundamentalDiagram,
    density: f64,
    length_km: f64,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), links: Vec::new(), splits: Vec::new() }
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    fn push_node(&mut self, pos: Point, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((pos, kind));
        self.splits.push(None);
        id
    }

    /// Add an ordinary junction and return its `NodeId` (sequential from 0).
    pub fn add_junction(&mut self, pos: Point) -> NodeId {
        self.push_node(pos, NodeKind::Junction)
    }

    /// Add a source injecting `inflow` veh/h.  Must end up with exactly one
    /// outgoing link and none incoming; checked at `build()`.
    pub fn add_source(&mut self, pos: Point, inflow: f64) -> NodeId {
        self.push_node(pos, NodeKind::Source { inflow })
    }

    /// Add a sink.  Must end up with exactly one incoming link and none
    /// outgoing; checked at `build()`.
    pub fn add_sink(&mut self, pos: Point) -> NodeId {
        self.push_node(pos, NodeKind::Sink)
    }

    // ── Links ─────────────────────────────────────────────────────────────

    /// Add a directed link from `from` to `to` with the given flow model and
    /// initial density.
    ///
    /// The link's length is the Euclidean distance between the endpoint
    /// positions; coincident endpoints are rejected.  The initial density
    /// must lie in `[0, jam_density]` of `fd`.
    pub fn add_link(
        &mut self,
        from: NodeId,
        to: NodeId,
        fd: FundamentalDiagram,
        initial_density: f64,
    ) -> TopologyResult<LinkId> {
        let from_pos = self.node_pos(from)?;
        let to_pos = self.node_pos(to)?;

        let length_km = from_pos.distance_km(to_pos);
        if !(length_km.is_finite() && length_km > 0.0) {
            return Err(TopologyError::ZeroLengthLink { from, to });
        }

        if initial_density < 0.0
            || initial_density > fd.jam_density()
            || initial_density.is_nan()
        {
            return Err(TopologyError::InitialDensity {
                from,
                to,
                source: DomainError::Density {
                    density: initial_density,
                    jam_density: fd.jam_density(),
                },
            });
        }

        let id = LinkId(self.links.len() as u32);
        self.links.push(RawLink { from, to, fd, density: initial_density, length_km });
        Ok(id)
    }

    // ── Turning ratios ────────────────────────────────────────────────────

    /// Attach an explicit split-ratio matrix to `node`.
    ///
    /// Rows correspond to the node's incoming links and columns to its
    /// outgoing links, both in link registration order.  The shape is
    /// validated against the final link counts at `build()`; a mismatch is
    /// an error there, never a silent fallback.
    pub fn set_turning_ratios(&mut self, node: NodeId, split: SplitMatrix) -> TopologyResult<()> {
        if node.index() >= self.nodes.len() {
            return Err(TopologyError::UnknownNode(node));
        }
        self.splits[node.index()] = Some(split);
        Ok(())
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Validate the topology and produce the immutable [`Network`] plus any
    /// [`BuildDiagnostic`]s.
    ///
    /// Checks, per node:
    /// - sources have 0 incoming / exactly 1 outgoing link;
    /// - sinks have exactly 1 incoming / 0 outgoing links;
    /// - junctions with incoming links have at least one outgoing link
    ///   (flow into a dead end cannot be conserved);
    /// - an explicit split matrix matches the `(incoming, outgoing)` shape;
    /// - junctions without an explicit matrix get the uniform default,
    ///   surfaced as [`BuildDiagnostic::DefaultSplitApplied`].
    pub fn build(self) -> TopologyResult<(Network, Vec<BuildDiagnostic>)> {
        let node_count = self.nodes.len();

        // Wire per-node incident link lists, preserving registration order.
        let mut incoming: Vec<Vec<LinkId>> = vec![Vec::new(); node_count];
        let mut outgoing: Vec<Vec<LinkId>> = vec![Vec::new(); node_count];
        for (i, raw) in self.links.iter().enumerate() {
            let id = LinkId(i as u32);
            outgoing[raw.from.index()].push(id);
            incoming[raw.to.index()].push(id);
        }

        let mut diagnostics = Vec::new();
        let mut nodes = Vec::with_capacity(node_count);

        for (i, ((pos, kind), split)) in
            self.nodes.into_iter().zip(self.splits).enumerate()
        {
            let id = NodeId(i as u32);
            let n_in = incoming[i].len();
            let n_out = outgoing[i].len();

            match kind {
                NodeKind::Source { .. } if n_in != 0 || n_out != 1 => {
                    return Err(TopologyError::SourceCardinality {
                        node: id,
                        incoming: n_in,
                        outgoing: n_out,
                    });
                }
                NodeKind::Sink if n_in != 1 || n_out != 0 => {
                    return Err(TopologyError::SinkCardinality {
                        node: id,
                        incoming: n_in,
                        outgoing: n_out,
                    });
                }
                NodeKind::Junction if n_in > 0 && n_out == 0 => {
                    return Err(TopologyError::DeadEnd { node: id });
                }
                _ => {}
            }

            let split = match split {
                Some(m) => {
                    let (got_rows, got_cols) = m.shape();
                    if (got_rows, got_cols) != (n_in, n_out) {
                        return Err(TopologyError::SplitShape {
                            node: id,
                            rows: n_in,
                            cols: n_out,
                            got_rows,
                            got_cols,
                        });
                    }
                    m
                }
                None => {
                    if matches!(kind, NodeKind::Junction) && n_in > 0 && n_out > 0 {
                        diagnostics.push(BuildDiagnostic::DefaultSplitApplied { node: id });
                    }
                    SplitMatrix::uniform(n_in, n_out)
                }
            };

            nodes.push(Node {
                id,
                pos,
                kind,
                incoming: std::mem::take(&mut incoming[i]),
                outgoing: std::mem::take(&mut outgoing[i]),
                split,
            });
        }

        let links = self
            .links
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                Link::new(LinkId(i as u32), raw.from, raw.to, raw.length_km, raw.fd, raw.density)
            })
            .collect();

        Ok((Network { nodes, links }, diagnostics))
    }

    fn node_pos(&self, id: NodeId) -> TopologyResult<Point> {
        self.nodes
            .get(id.index())
            .map(|(pos, _)| *pos)
            .ok_or(TopologyError::UnknownNode(id))
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
