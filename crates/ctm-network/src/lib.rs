//! `ctm-network` — road network topology for the `rust_ctm` workspace.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`link`]    | `Link` — directed road segment with density and flow slots |
//! | [`node`]    | `Node`, `NodeKind`, `SplitMatrix`                          |
//! | [`network`] | `Network`, `NetworkBuilder`, `BuildDiagnostic`             |
//! | [`error`]   | `TopologyError`, `TopologyResult<T>`                       |
//!
//! # Topology model
//!
//! A network is a set of directed links connected through nodes.  Every link
//! has exactly one from-node and one to-node; nodes hold ordered lists of
//! their incident links plus a split-ratio matrix describing how incoming
//! flow distributes over outgoing links.  Topology is built once through
//! [`NetworkBuilder`] and is structurally immutable afterwards — during a
//! run only link densities and transient flow slots change.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod error;
pub mod link;
pub mod network;
pub mod node;


pub use error::{TopologyError, TopologyResult};
pub use link::Link;
pub use network::{BuildDiagnostic, Network, NetworkBuilder};
pub use node::{Node, NodeKind, SplitMatrix};
