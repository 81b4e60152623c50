#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueMessage {
    pub message_id: Option<String>,
    pub body: String,
    pub receipt_handle: Option<String>,
    /// Event source ARN of the queue the message was received from.
    pub source_identifier: String,
    pub region: String,
}

impl QueueMessage {
    /// Receipt handle usable for deletion, if the message carries a non-empty one.
    pub fn receipt(&self) -> Option<&str> {
        self.receipt_handle
            .as_deref()
            .filter(|handle| !handle.trim().is_empty())
    }

    pub fn display_id(&self) -> &str {
        self.message_id.as_deref().unwrap_or("<unknown>")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBatch {
    pub records: Vec<QueueMessage>,
}

impl MessageBatch {
    pub fn new(records: Vec<QueueMessage>) -> Self {
        Self { records }
    }

    /// Region of the batch, taken from the first record.
    ///
    /// Returns `None` for an empty batch.
    pub fn region(&self) -> Option<&str> {
        self.records.first().map(|record| record.region.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
