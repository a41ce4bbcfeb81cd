//! Kafka channel registry
//!
//! The single authoritative mapping from channel id to a running consumer or
//! publisher. Entries live in per-key-atomic concurrent maps; the entry is
//! held while the broker client is constructed, so concurrent creators of
//! the same channel never race two clients into existence, while unrelated
//! channels proceed independently.

use crate::api::{ChannelId, Messenger, MessengerError, MessengerResult};
use crate::kafka::consumer::KafkaConsumer;
use crate::kafka::options::{KafkaConsumerOptions, KafkaPublisherOptions};
use crate::kafka::publisher::KafkaPublisher;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rdkafka::consumer::{Consumer as KafkaClient, StreamConsumer};
use rdkafka::producer::FutureProducer;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Registry of Kafka channels
#[derive(Default)]
pub struct KafkaMessenger {
    consumers: DashMap<ChannelId, Arc<KafkaConsumer>>,
    publishers: DashMap<ChannelId, Arc<KafkaPublisher>>,
}

impl KafkaMessenger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Messenger for KafkaMessenger {
    type Consumer = KafkaConsumer;
    type Publisher = KafkaPublisher;
    type ConsumerOptions = KafkaConsumerOptions;
    type PublisherOptions = KafkaPublisherOptions;

    fn create_consumer(
        &self,
        channel_id: &ChannelId,
        options: KafkaConsumerOptions,
    ) -> MessengerResult<Arc<KafkaConsumer>> {
        info!(channel = %channel_id, options = %options, "Creating kafka consumer channel");

        match self.consumers.entry(channel_id.clone()) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if *existing.options() != options {
                    error!(
                        channel = %channel_id,
                        existing = %existing.options(),
                        requested = %options,
                        "Trying to redeclare existing consumer channel with different options - this is not allowed"
                    );
                    Err(MessengerError::ChannelRedeclaration(channel_id.clone()))
                } else {
                    info!(channel = %channel_id, "Found existing consumer for channel. It will be reused");
                    Ok(Arc::clone(existing))
                }
            }
            Entry::Vacant(entry) => {
                let client = build_consumer_client(channel_id, &options)?;
                let consumer = Arc::new(KafkaConsumer::new(client, options));
                entry.insert(Arc::clone(&consumer));
                Ok(consumer)
            }
        }
    }

    fn create_publisher(
        &self,
        channel_id: &ChannelId,
        options: KafkaPublisherOptions,
    ) -> MessengerResult<Arc<KafkaPublisher>> {
        info!(channel = %channel_id, options = %options, "Creating kafka publisher channel");

        match self.publishers.entry(channel_id.clone()) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if *existing.options() != options {
                    error!(
                        channel = %channel_id,
                        existing = %existing.options(),
                        requested = %options,
                        "Trying to redeclare existing publisher channel with different options - this is not allowed"
                    );
                    Err(MessengerError::ChannelRedeclaration(channel_id.clone()))
                } else {
                    info!(channel = %channel_id, "Found existing publisher for channel. It will be reused");
                    Ok(Arc::clone(existing))
                }
            }
            Entry::Vacant(entry) => {
                let producer: FutureProducer =
                    options.to_client_config().create().map_err(|err| {
                        error!(channel = %channel_id, error = %err, "Failed to create kafka publisher channel");
                        MessengerError::publisher_construction(channel_id.clone(), err)
                    })?;
                let publisher = Arc::new(KafkaPublisher::new(producer, options));
                entry.insert(Arc::clone(&publisher));
                Ok(publisher)
            }
        }
    }

    fn get_consumer(&self, channel_id: &ChannelId) -> MessengerResult<Arc<KafkaConsumer>> {
        self.consumers
            .get(channel_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                error!(channel = %channel_id, "Consumer channel is not declared");
                MessengerError::ChannelNotDeclared(channel_id.clone())
            })
    }

    fn get_publisher(&self, channel_id: &ChannelId) -> MessengerResult<Arc<KafkaPublisher>> {
        self.publishers
            .get(channel_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                error!(channel = %channel_id, "Publisher channel is not declared");
                MessengerError::ChannelNotDeclared(channel_id.clone())
            })
    }

    fn destroy_consumer(&self, channel_id: &ChannelId) {
        debug!(channel = %channel_id, "Removing consumer channel from registry");
        self.consumers.remove(channel_id);
    }

    fn destroy_publisher(&self, channel_id: &ChannelId) {
        debug!(channel = %channel_id, "Removing publisher channel from registry");
        self.publishers.remove(channel_id);
    }
}

/// Construct and subscribe the underlying broker client. Called with the
/// registry entry held, so construction failures roll back to a clean map.
fn build_consumer_client(
    channel_id: &ChannelId,
    options: &KafkaConsumerOptions,
) -> MessengerResult<StreamConsumer> {
    let client: StreamConsumer = options.to_client_config().create().map_err(|err| {
        error!(channel = %channel_id, error = %err, "Failed to create kafka consumer channel");
        MessengerError::consumer_construction(channel_id.clone(), err)
    })?;

    client.subscribe(&[options.topic_name()]).map_err(|err| {
        error!(channel = %channel_id, error = %err, "Failed to subscribe kafka consumer channel");
        MessengerError::consumer_construction(channel_id.clone(), err)
    })?;

    Ok(client)
}
