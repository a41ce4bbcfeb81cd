//! Fire-and-forget Kafka publisher

use crate::api::{Message, Publisher};
use crate::kafka::options::KafkaPublisherOptions;
use crate::metrics::MESSENGER_METRICS;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::sync::Arc;
use tracing::{error, warn};

/// Publisher for one Kafka channel.
///
/// Stateless beyond the producer handle and its options; delivery is
/// confirmed asynchronously and failures are logged, never surfaced to the
/// publishing caller.
pub struct KafkaPublisher {
    producer: Arc<FutureProducer>,
    options: KafkaPublisherOptions,
}

impl KafkaPublisher {
    pub(crate) fn new(producer: FutureProducer, options: KafkaPublisherOptions) -> Self {
        Self {
            producer: Arc::new(producer),
            options,
        }
    }

    /// Options this channel was declared with
    pub fn options(&self) -> &KafkaPublisherOptions {
        &self.options
    }
}

impl Publisher for KafkaPublisher {
    fn publish(&self, msg: &Message) {
        let topic = self.options.topic_name();
        let record: FutureRecord<'_, (), [u8]> = FutureRecord::to(topic).payload(msg.payload());

        match self.producer.send_result(record) {
            Err((err, _record)) => {
                error!(topic = %topic, error = %err, "Failed to enqueue message");
                MESSENGER_METRICS
                    .publish_failures
                    .with_label_values(&[topic])
                    .inc();
            }
            Ok(delivery) => {
                MESSENGER_METRICS
                    .messages_published
                    .with_label_values(&[topic])
                    .inc();

                let topic = topic.to_string();
                tokio::spawn(async move {
                    match delivery.await {
                        Ok(Ok(_)) => {}
                        Ok(Err((err, _msg))) => {
                            warn!(topic = %topic, error = %err, "Message wasn't delivered to kafka");
                            MESSENGER_METRICS
                                .publish_failures
                                .with_label_values(&[topic.as_str()])
                                .inc();
                        }
                        Err(_) => {
                            warn!(topic = %topic, "Delivery confirmation was dropped");
                        }
                    }
                });
            }
        }
    }
}
