use std::collections::HashMap;

use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::Region;
use aws_sdk_sqs::error::DisplayErrorContext;
use sqs_batch_core::{AcknowledgeRequest, Acknowledger};
use tokio::sync::Mutex;

use crate::config::ConsumerConfig;

/// Process-wide SQS clients, built on first use for each region and reused
/// afterwards.
pub struct RegionalSqsClients {
    endpoint_url: Option<String>,
    default_region: String,
    clients: Mutex<HashMap<String, aws_sdk_sqs::Client>>,
}

impl RegionalSqsClients {
    pub fn new(config: &ConsumerConfig) -> Self {
        Self {
            endpoint_url: config.sqs_endpoint_url.clone(),
            default_region: config.default_region.clone(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client for `region`, falling back to the default region
    /// when `region` is blank.
    pub async fn client_for(&self, region: &str) -> aws_sdk_sqs::Client {
        let region = match region.trim() {
            "" => self.default_region.as_str(),
            value => value,
        };

        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(region) {
            return client.clone();
        }

        tracing::debug!(region, "creating sqs client");
        let client = self.build_client(region).await;
        clients.insert(region.to_string(), client.clone());
        client
    }

    pub async fn cached_regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.clients.lock().await.keys().cloned().collect();
        regions.sort();
        regions
    }

    async fn build_client(&self, region: &str) -> aws_sdk_sqs::Client {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        aws_sdk_sqs::Client::new(&loader.load().await)
    }
}

/// Deletes handled messages with `DeleteMessage`.
pub struct SqsAcknowledger {
    clients: RegionalSqsClients,
}

impl SqsAcknowledger {
    pub fn new(clients: RegionalSqsClients) -> Self {
        Self { clients }
    }
}

impl Acknowledger for SqsAcknowledger {
    async fn acknowledge(
        &self,
        region: &str,
        request: &AcknowledgeRequest,
    ) -> Result<(), String> {
        let client = self.clients.client_for(region).await;
        client
            .delete_message()
            .queue_url(&request.queue_url)
            .receipt_handle(&request.receipt_handle)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                format!(
                    "failed to delete message from sqs: {}",
                    DisplayErrorContext(&error)
                )
            })
    }
}
