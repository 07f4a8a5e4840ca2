//! Core library for Deckhand
//!
//! This crate contains the domain logic for organization membership audits:
//! - Wire record types as returned by the boards API
//! - The merged member/board-access report model
//! - The membership aggregator and report sort policy

pub mod error;
pub mod record;
pub mod roster;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
