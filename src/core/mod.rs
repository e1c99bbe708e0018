//! Core library components.
//!
//! Enumeration, filtering and remediation logic, plus the provider seam it
//! runs against. Nothing here installs a logger or reads the terminal.

pub mod actions;
pub mod config;
pub mod constants;
pub mod domain;
pub mod enumerate;
pub mod filter;
pub mod obs;
pub mod provider;
pub mod remediate;
pub mod types;
