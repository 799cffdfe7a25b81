//! World ID proof verification.
//!
//! Proofs are zero-knowledge credentials asserting unique personhood without
//! revealing identity. This module forwards them to the Developer Portal's
//! per-application verify endpoint and normalizes the response; the
//! cryptographic checks themselves happen remotely.
//!
//! # Components
//! - `error`: Failure variants for proof verification
//! - `verifier`: The adapter trait, its Developer Portal implementation, and a mock
//! - `request`: HTTP client utilities for portal communication (internal)

pub mod error;
pub mod verifier;

mod request;
