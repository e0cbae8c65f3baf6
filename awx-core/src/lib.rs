//! AWX Core
//!
//! Core types shared by the AWX client and command-line tool.
//!
//! This crate contains:
//! - Domain types: jobs, job statuses and the templates jobs are launched from
//! - DTOs: wire envelopes such as launch acknowledgments and list pages

pub mod domain;
pub mod dto;
