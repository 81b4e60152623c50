use thiserror::Error;

use crate::queue_address::QueueAddressError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("payload could not be deserialized: {0}")]
    PayloadDeserialization(String),
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("handler panicked: {0}")]
    HandlerPanicked(String),
    #[error("queue address could not be derived: {0}")]
    QueueAddress(#[from] QueueAddressError),
    #[error("message could not be deleted: {0}")]
    Acknowledge(String),
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayloadDeserialization(_) => "payload_deserialization",
            Self::Handler(_) => "handler",
            Self::HandlerPanicked(_) => "handler_panicked",
            Self::QueueAddress(_) => "queue_address",
            Self::Acknowledge(_) => "acknowledge",
        }
    }

    /// Whether the handler already ran to completion for this message.
    ///
    /// Such messages are redelivered and handled again.
    pub fn handler_completed(&self) -> bool {
        matches!(self, Self::QueueAddress(_) | Self::Acknowledge(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFailure {
    /// Position of the message within its batch.
    pub index: usize,
    pub message_id: Option<String>,
    pub kind: FailureKind,
}

/// Receives one call per failed message.
pub trait FailureSink {
    fn record(&self, failure: &MessageFailure);
}

impl<F> FailureSink for F
where
    F: Fn(&MessageFailure),
{
    fn record(&self, failure: &MessageFailure) {
        self(failure)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn record(&self, failure: &MessageFailure) {
        tracing::error!(
            index = failure.index,
            message_id = failure.message_id.as_deref().unwrap_or("<unknown>"),
            failure_kind = failure.kind.as_str(),
            handler_completed = failure.kind.handler_completed(),
            error = %failure.kind,
            "message_failed"
        );
    }
}
