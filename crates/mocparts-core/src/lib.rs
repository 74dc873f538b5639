//! Mocparts Core Types
//!
//! This crate provides the domain types shared by the mocparts crates:
//!
//! - **Colors**: opaque color tokens and the inherit sentinel ([`color::ColorId`])
//! - **Parts**: part identifiers with suffix canonicalization ([`part::PartId`])
//! - **Models**: model names and model entries ([`model`] module)
//! - **Trace**: the append-only diagnostic trace ([`trace::DiagnosticTrace`])

pub mod color;
pub mod model;
pub mod part;
pub mod trace;
