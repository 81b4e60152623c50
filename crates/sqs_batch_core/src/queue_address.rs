use thiserror::Error;

const ARN_PREFIX: &str = "arn:";
const SQS_SERVICE: &str = "sqs";
const CHINA_PARTITION: &str = "aws-cn";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueAddressError {
    #[error("event source `{0}` is not an ARN")]
    NotAnArn(String),
    #[error("event source `{arn}` belongs to service `{service}`, expected sqs")]
    WrongService { arn: String, service: String },
    #[error("event source `{arn}` is missing its {component}")]
    MissingComponent { arn: String, component: &'static str },
    #[error("event source `{arn}` has queue name `{queue_name}` containing `:`")]
    InvalidQueueName { arn: String, queue_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueAddress {
    pub region: String,
    pub account_id: String,
    pub queue_name: String,
    pub url: String,
}

impl QueueAddress {
    /// Derives the queue URL from an SQS event source ARN.
    ///
    /// The ARN has the shape `arn:<partition>:sqs:<region>:<account-id>:<queue-name>`.
    /// `region` is the message's region attribute; when it is blank the ARN's
    /// own region is used.
    pub fn from_source_arn(arn: &str, region: &str) -> Result<Self, QueueAddressError> {
        let rest = arn
            .strip_prefix(ARN_PREFIX)
            .ok_or_else(|| QueueAddressError::NotAnArn(arn.to_string()))?;

        let mut parts = rest.splitn(5, ':');
        let partition = parts.next().unwrap_or_default();
        let service = parts.next().unwrap_or_default();
        let arn_region = parts.next().unwrap_or_default();
        let account_id = parts.next().unwrap_or_default();
        let queue_name = parts.next().unwrap_or_default();

        if service != SQS_SERVICE {
            return Err(QueueAddressError::WrongService {
                arn: arn.to_string(),
                service: service.to_string(),
            });
        }

        let region = match region.trim() {
            "" => arn_region,
            value => value,
        };
        for (component, value) in [
            ("region", region),
            ("account id", account_id),
            ("queue name", queue_name),
        ] {
            if value.is_empty() {
                return Err(QueueAddressError::MissingComponent {
                    arn: arn.to_string(),
                    component,
                });
            }
        }
        if queue_name.contains(':') {
            return Err(QueueAddressError::InvalidQueueName {
                arn: arn.to_string(),
                queue_name: queue_name.to_string(),
            });
        }

        let domain = if partition == CHINA_PARTITION {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        };

        Ok(Self {
            region: region.to_string(),
            account_id: account_id.to_string(),
            queue_name: queue_name.to_string(),
            url: format!("https://sqs.{region}.{domain}/{account_id}/{queue_name}"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgeRequest {
    pub queue_url: String,
    pub receipt_handle: String,
}

impl AcknowledgeRequest {
    pub fn new(address: &QueueAddress, receipt_handle: impl Into<String>) -> Self {
        Self {
            queue_url: address.url.clone(),
            receipt_handle: receipt_handle.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUEUE_ARN: &str = "arn:aws:sqs:us-east-1:123456789012:my-queue";

    #[test]
    fn derives_standard_queue_url() {
        let address = QueueAddress::from_source_arn(QUEUE_ARN, "us-east-1")
            .expect("arn should parse");

        assert_eq!(
            address.url,
            "https://sqs.us-east-1.amazonaws.com/123456789012/my-queue"
        );
        assert_eq!(address.account_id, "123456789012");
        assert_eq!(address.queue_name, "my-queue");
    }

    #[test]
    fn keeps_fifo_suffix_in_queue_name() {
        let address = QueueAddress::from_source_arn(
            "arn:aws:sqs:eu-west-2:123456789012:orders.fifo",
            "eu-west-2",
        )
        .expect("fifo arn should parse");

        assert_eq!(
            address.url,
            "https://sqs.eu-west-2.amazonaws.com/123456789012/orders.fifo"
        );
    }

    #[test]
    fn falls_back_to_arn_region_when_attribute_blank() {
        let address = QueueAddress::from_source_arn("arn:aws:sqs:ap-south-1:123456789012:jobs", "")
            .expect("arn should parse");

        assert_eq!(address.region, "ap-south-1");
        assert!(address.url.starts_with("https://sqs.ap-south-1."));
    }

    #[test]
    fn china_partition_uses_cn_domain() {
        let address = QueueAddress::from_source_arn(
            "arn:aws-cn:sqs:cn-north-1:123456789012:jobs",
            "cn-north-1",
        )
        .expect("arn should parse");

        assert_eq!(
            address.url,
            "https://sqs.cn-north-1.amazonaws.com.cn/123456789012/jobs"
        );
    }

    #[test]
    fn rejects_non_arn_source() {
        let error = QueueAddress::from_source_arn("my-queue", "us-east-1")
            .expect_err("plain name should fail");
        assert_eq!(error, QueueAddressError::NotAnArn("my-queue".to_string()));
    }

    #[test]
    fn rejects_non_sqs_service() {
        let error =
            QueueAddress::from_source_arn("arn:aws:sns:us-east-1:123456789012:topic", "us-east-1")
                .expect_err("sns arn should fail");

        assert_eq!(
            error,
            QueueAddressError::WrongService {
                arn: "arn:aws:sns:us-east-1:123456789012:topic".to_string(),
                service: "sns".to_string(),
            }
        );
    }

    #[test]
    fn rejects_missing_queue_name() {
        let error = QueueAddress::from_source_arn("arn:aws:sqs:us-east-1:123456789012", "us-east-1")
            .expect_err("missing queue should fail");
        assert!(error.to_string().contains("queue name"));
    }

    #[test]
    fn rejects_trailing_segment_after_queue_name() {
        let error = QueueAddress::from_source_arn(
            "arn:aws:sqs:us-east-1:123456789012:my-queue:extra",
            "us-east-1",
        )
        .expect_err("extra segment should fail");

        assert_eq!(
            error,
            QueueAddressError::InvalidQueueName {
                arn: "arn:aws:sqs:us-east-1:123456789012:my-queue:extra".to_string(),
                queue_name: "my-queue:extra".to_string(),
            }
        );
    }

    #[test]
    fn acknowledge_request_targets_derived_url() {
        let address = QueueAddress::from_source_arn(QUEUE_ARN, "us-east-1")
            .expect("arn should parse");
        let request = AcknowledgeRequest::new(&address, "rh-1");

        assert_eq!(request.queue_url, address.url);
        assert_eq!(request.receipt_handle, "rh-1");
    }
}
