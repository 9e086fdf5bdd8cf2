//! Compliance evidence aggregation for regional cloud resources.
//!
//! This crate provides:
//! - A provider client abstraction for read-only resource listings (`provider`)
//! - Normalization of raw provider records into canonical shapes (`normalize`)
//! - Named boolean compliance assertions per proof type (`assertions`)
//! - Proof generation and bundle assembly (`proof`, `bundle`)
//! - Bundle persistence and archive packaging (`export`)

pub mod assertions;
pub mod bundle;
pub mod error;
pub mod export;
pub mod normalize;
pub mod profiles;
pub mod proof;
pub mod provider;

pub use error::{EvidenceError, EvidenceResult};
