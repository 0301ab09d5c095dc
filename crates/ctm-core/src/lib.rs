//! `ctm-core` — foundational types for the `rust_ctm` traffic simulation
//! workspace.
//!
//! This crate is a dependency of every other `ctm-*` crate.  It intentionally
//! has no `ctm-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `LinkId`                                     |
//! | [`point`] | `Point`, planar distance                               |
//! | [`fd`]    | `FundamentalDiagram` — the density→(flow, speed) model |
//! | [`time`]  | `SimClock`, `SimConfig`                                |
//! | [`error`] | `DomainError`, `CoreResult`                            |
//!
//! # Units
//!
//! The whole workspace uses one consistent unit system: kilometres for
//! length, hours for time, veh/km for density, veh/h for flow, km/h for
//! speed.  No type-level unit checking is done; the units are part of every
//! field's documentation instead.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod fd;
pub mod ids;
pub mod point;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreResult, DomainError};
pub use fd::FundamentalDiagram;
pub use ids::{LinkId, NodeId};
pub use point::Point;
pub use time::{SimClock, SimConfig};
