//! # ModKit
//!
//! Small shared toolkit for the server's HTTP modules:
//!
//! - RFC 9457 problem responses ([`Problem`], [`ProblemResponse`])
//! - length-aware pagination envelope ([`Page`], [`PageInfo`])
//! - process shutdown signal handling ([`shutdown::wait_for_shutdown`])

pub mod api;
pub mod shutdown;

pub use api::page::{Page, PageInfo};
pub use api::problem::{
    unauthorized, unprocessable, Problem, ProblemResponse, ValidationError,
    APPLICATION_PROBLEM_JSON,
};
