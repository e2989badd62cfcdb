//! Market intelligence backend for pharmaceutical investment dashboards.
//!
//! The crate aggregates three sources behind one normalized API: a hosted
//! relational store (drug catalog, market statistics, regulatory bulletins,
//! user profiles), the WHO Global Health Observatory, and a fixed demo
//! dataset used whenever the store is unconfigured, unreachable, or empty.
//! Callers always receive a populated, well-typed result tagged with its
//! provenance.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
