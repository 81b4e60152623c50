use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use lambda_runtime::{Error, LambdaEvent};
use serde::de::DeserializeOwned;
use sqs_batch_core::{
    Acknowledger, BatchProcessor, FailureSink, MessageBatch, PayloadHandler, QueueMessage,
};

pub fn queue_message_from_record(record: SqsMessage) -> QueueMessage {
    QueueMessage {
        message_id: record.message_id,
        body: record.body.unwrap_or_default(),
        receipt_handle: record.receipt_handle,
        source_identifier: record.event_source_arn.unwrap_or_default(),
        region: record.aws_region.unwrap_or_default(),
    }
}

pub fn message_batch_from_event(event: SqsEvent) -> MessageBatch {
    MessageBatch::new(
        event
            .records
            .into_iter()
            .map(queue_message_from_record)
            .collect(),
    )
}

/// Lambda entry point for an SQS trigger.
///
/// Always returns `Ok`: failed messages stay on the queue and are retried by
/// its redelivery policy.
pub async fn handle_sqs_event<P, H, A, S>(
    event: LambdaEvent<SqsEvent>,
    processor: &BatchProcessor<P, H, A, S>,
) -> Result<(), Error>
where
    P: DeserializeOwned,
    H: PayloadHandler<P>,
    A: Acknowledger,
    S: FailureSink,
{
    let (payload, context) = event.into_parts();
    let batch = message_batch_from_event(payload);
    tracing::debug!(
        request_id = %context.request_id,
        records = batch.len(),
        "sqs_event_received"
    );

    let report = processor.process_batch(&batch).await;
    if report.failed() > 0 {
        tracing::warn!(
            request_id = %context.request_id,
            failed = report.failed(),
            "messages left on queue for redelivery"
        );
    }
    Ok(())
}
