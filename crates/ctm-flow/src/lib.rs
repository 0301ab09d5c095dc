//! `ctm-flow` — flow resolution and state stepping for the `rust_ctm`
//! workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`junction`] | `resolve_node` — per-node flow resolution, `JunctionFlows` |
//! | [`engine`]   | `FlowEngine` — the two-phase simulation step               |
//! | [`error`]    | `FlowError`, `FlowResult<T>`                               |
//!
//! # Two-phase step
//!
//! ```text
//! FlowEngine::step(network, dt):
//!   ① Resolve  — for every node, compute the flows across its incident
//!                links from pre-step densities (parallel with the
//!                `parallel` feature) into JunctionFlows values.
//!   ② Apply    — write the resolved flows into the links' transient slots
//!                (sequential; each slot has exactly one writing node).
//!   ③ Update   — advance every link's density by the continuity equation
//!                (parallel with the `parallel` feature).
//! ```
//!
//! Splitting resolve from update is the correctness invariant of the whole
//! scheme: every node resolves against the densities of the *previous* step,
//! never against a partially updated network.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs the resolve and update phases on Rayon's pool.     |

pub mod engine;
pub mod error;
pub mod junction;


pub use engine::FlowEngine;
pub use error::{FlowError, FlowResult};
pub use junction::{resolve_node, JunctionFlows};
