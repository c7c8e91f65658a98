//! Nexus IQ: observability dashboard for the query optimizer.
//!
//! Loads three pre-aggregated JSON datasets (rewriter, adoption, feedback),
//! derives health scores from them, and serves the result as an embedded web
//! dashboard or as terminal reports.

pub mod cli;
pub mod config;
pub mod data;
pub mod filter;
pub mod metrics;
pub mod view;
pub mod web;
