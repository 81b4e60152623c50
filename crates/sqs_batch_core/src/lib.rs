//! Queue batch processing primitives.
//!
//! This crate owns the message model, queue address derivation and the
//! sequential per-message processing loop. It excludes AWS SDK and Lambda
//! runtime concerns; those live in `sqs_batch_lambda`.

pub mod acknowledge;
pub mod failure;
pub mod handler;
pub mod message;
pub mod processor;
pub mod queue_address;

pub use acknowledge::Acknowledger;
pub use failure::{FailureKind, FailureSink, MessageFailure, TracingFailureSink};
pub use handler::{handler_fn, sync_handler_fn, PayloadHandler};
pub use message::{MessageBatch, QueueMessage};
pub use processor::{BatchProcessor, BatchReport, MessageOutcome};
pub use queue_address::{AcknowledgeRequest, QueueAddress, QueueAddressError};
