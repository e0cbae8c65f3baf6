//! Core domain types
//!
//! These types mirror the resources exposed under `/api/v2/` and are
//! decoded directly from API responses. Fields the client does not model
//! explicitly are preserved in an `extra` map.

pub mod job;
pub mod template;
