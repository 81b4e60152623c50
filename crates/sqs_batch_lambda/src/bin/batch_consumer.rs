use lambda_runtime::{service_fn, Error};
use serde_json::Value;
use sqs_batch_core::{handler_fn, BatchProcessor};
use sqs_batch_lambda::adapters::sqs_client::{RegionalSqsClients, SqsAcknowledger};
use sqs_batch_lambda::config::ConsumerConfig;
use sqs_batch_lambda::handlers::batch::handle_sqs_event;
use sqs_batch_lambda::logging::init_tracing;

async fn log_payload(payload: Value) -> Result<(), Error> {
    tracing::info!(%payload, "payload_received");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ConsumerConfig::from_env()?;
    init_tracing(config.log_format)?;

    let acknowledger = SqsAcknowledger::new(RegionalSqsClients::new(&config));
    let processor = BatchProcessor::new(handler_fn(log_payload), acknowledger);
    let processor = &processor;

    lambda_runtime::run(service_fn(move |event| handle_sqs_event(event, processor))).await
}
