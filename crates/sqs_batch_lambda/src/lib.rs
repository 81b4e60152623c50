//! AWS-oriented adapters and handlers for SQS batch consumption.
//!
//! This crate owns runtime integration details (the Lambda SQS trigger, the
//! `DeleteMessage` adapter, per-region client reuse, environment
//! configuration and log setup). Batch semantics live in `sqs_batch_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
