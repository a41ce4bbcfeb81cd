//! Prometheus metrics for channel traffic

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

/// Messenger metrics
pub struct MessengerMetrics {
    /// Messages enqueued for publishing
    pub messages_published: CounterVec,

    /// Messages buffered by consumer channels
    pub messages_received: CounterVec,

    /// Enqueue and delivery failures
    pub publish_failures: CounterVec,

    /// Errored records dropped by consumer channels
    pub records_dropped: CounterVec,
}

lazy_static! {
    pub static ref MESSENGER_METRICS: MessengerMetrics = MessengerMetrics {
        messages_published: register_counter_vec!(
            "messenger_messages_published_total",
            "Total number of messages enqueued for publishing",
            &["topic"]
        )
        .unwrap(),

        messages_received: register_counter_vec!(
            "messenger_messages_received_total",
            "Total number of messages buffered by consumer channels",
            &["topic"]
        )
        .unwrap(),

        publish_failures: register_counter_vec!(
            "messenger_publish_failures_total",
            "Total number of failed publishes",
            &["topic"]
        )
        .unwrap(),

        records_dropped: register_counter_vec!(
            "messenger_records_dropped_total",
            "Total number of errored records dropped during polling",
            &["topic"]
        )
        .unwrap(),
    };
}

/// Initialize messenger metrics
pub fn init_messenger_metrics() {
    lazy_static::initialize(&MESSENGER_METRICS);
}
