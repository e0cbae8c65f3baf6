//! Data Transfer Objects
//!
//! Envelopes that wrap domain types on the wire: paginated listings and
//! the acknowledgments returned by launch endpoints.

pub mod launch;
pub mod list;
