use std::any::Any;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use serde::de::DeserializeOwned;

use crate::acknowledge::Acknowledger;
use crate::failure::{FailureKind, FailureSink, MessageFailure, TracingFailureSink};
use crate::handler::{decode_payload, PayloadHandler};
use crate::message::{MessageBatch, QueueMessage};
use crate::queue_address::{AcknowledgeRequest, QueueAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Acknowledged,
    /// The handler succeeded but the message had no receipt handle to delete with.
    HandledWithoutReceipt,
    Failed(MessageFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One entry per attempted message, in batch order.
    pub outcomes: Vec<MessageOutcome>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn acknowledged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, MessageOutcome::Acknowledged))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &MessageFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            MessageOutcome::Failed(failure) => Some(failure),
            _ => None,
        })
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }
}

/// Applies a payload handler to every message of a batch and deletes the
/// messages it handled.
///
/// Messages are processed one at a time in batch order. A failing message is
/// reported to the failure sink and left on the queue for redelivery; it never
/// stops the rest of the batch and never fails the batch as a whole.
///
/// Delivery is at-least-once: when the handler succeeds but the delete fails,
/// the message comes back and the handler runs again for it.
pub struct BatchProcessor<P, H, A, S = TracingFailureSink> {
    handler: H,
    acknowledger: A,
    failure_sink: S,
    _payload: PhantomData<fn() -> P>,
}

impl<P, H, A> BatchProcessor<P, H, A, TracingFailureSink>
where
    P: DeserializeOwned,
    H: PayloadHandler<P>,
    A: Acknowledger,
{
    pub fn new(handler: H, acknowledger: A) -> Self {
        Self {
            handler,
            acknowledger,
            failure_sink: TracingFailureSink,
            _payload: PhantomData,
        }
    }
}

impl<P, H, A, S> BatchProcessor<P, H, A, S>
where
    P: DeserializeOwned,
    H: PayloadHandler<P>,
    A: Acknowledger,
    S: FailureSink,
{
    pub fn with_failure_sink<S2: FailureSink>(
        self,
        failure_sink: S2,
    ) -> BatchProcessor<P, H, A, S2> {
        BatchProcessor {
            handler: self.handler,
            acknowledger: self.acknowledger,
            failure_sink,
            _payload: PhantomData,
        }
    }

    pub fn acknowledger(&self) -> &A {
        &self.acknowledger
    }

    pub async fn process_batch(&self, batch: &MessageBatch) -> BatchReport {
        let Some(region) = batch.region() else {
            tracing::debug!("empty batch, nothing to process");
            return BatchReport::default();
        };

        let started_at = Instant::now();
        tracing::info!(records = batch.len(), region, "batch_started");

        let mut outcomes = Vec::with_capacity(batch.len());
        for (index, message) in batch.records.iter().enumerate() {
            let outcome = match self.process_message(region, message).await {
                Ok(outcome) => outcome,
                Err(kind) => {
                    let failure = MessageFailure {
                        index,
                        message_id: message.message_id.clone(),
                        kind,
                    };
                    self.failure_sink.record(&failure);
                    MessageOutcome::Failed(failure)
                }
            };
            tracing::debug!(
                index,
                message_id = message.display_id(),
                ?outcome,
                "message_processed"
            );
            outcomes.push(outcome);
        }

        let report = BatchReport { outcomes };
        tracing::info!(
            records = report.attempted(),
            acknowledged = report.acknowledged(),
            failed = report.failed(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "batch_completed"
        );
        report
    }

    async fn process_message(
        &self,
        region: &str,
        message: &QueueMessage,
    ) -> Result<MessageOutcome, FailureKind> {
        let payload: P = decode_payload(&message.body)
            .map_err(|error| FailureKind::PayloadDeserialization(error.to_string()))?;

        self.run_handler(payload).await?;

        let Some(receipt_handle) = message.receipt() else {
            return Ok(MessageOutcome::HandledWithoutReceipt);
        };

        let address = QueueAddress::from_source_arn(&message.source_identifier, &message.region)?;
        let request = AcknowledgeRequest::new(&address, receipt_handle);
        self.acknowledger
            .acknowledge(region, &request)
            .await
            .map_err(FailureKind::Acknowledge)?;

        Ok(MessageOutcome::Acknowledged)
    }

    /// Runs the handler, turning a panic raised while building or polling its
    /// future into a failure of the current message.
    async fn run_handler(&self, payload: P) -> Result<(), FailureKind> {
        let build_future = AssertUnwindSafe(|| self.handler.handle(payload));
        let handled = match std::panic::catch_unwind(build_future) {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(panic) => Err(panic),
        };

        handled
            .map_err(|panic| FailureKind::HandlerPanicked(panic_message(panic.as_ref())))?
            .map_err(|error| FailureKind::Handler(error.to_string()))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
