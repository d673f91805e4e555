//! trendlens: trend segmentation, per-bar pattern annotation and position
//! return statistics over historical price bars.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
