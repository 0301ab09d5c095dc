//! Core error type.
//!
//! `DomainError` covers input-contract violations against the fundamental
//! diagram: a density outside the diagram's valid range, or non-physical
//! diagram parameters.  These are caller-side defects — never retried, always
//! propagated synchronously.  Sub-crates define their own error enums and
//! wrap `DomainError` as one variant where needed.

use thiserror::Error;

/// Input-contract violation against a [`FundamentalDiagram`][crate::fd::FundamentalDiagram].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// A density query outside `[0, jam_density]`.
    #[error("density {density} veh/km outside valid range [0, {jam_density}]")]
    Density { density: f64, jam_density: f64 },

    /// A diagram or configuration parameter that must be positive and finite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Shorthand result type for `ctm-core` operations.
pub type CoreResult<T> = Result<T, DomainError>;
