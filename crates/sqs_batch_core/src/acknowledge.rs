use std::future::Future;

use crate::queue_address::AcknowledgeRequest;

/// Removes a successfully handled message from its source queue.
///
/// `region` is the batch region and selects the client the request is sent
/// through.
pub trait Acknowledger {
    fn acknowledge(
        &self,
        region: &str,
        request: &AcknowledgeRequest,
    ) -> impl Future<Output = Result<(), String>> + Send;
}
