//! Broker-agnostic messenger trait abstractions

use crate::api::channel::ChannelId;
use crate::api::error::MessengerResult;
use crate::api::message::Message;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Consuming side of a channel.
///
/// Implementations buffer broker records in the background and hand them out
/// one at a time, oldest first. Acknowledgment is caller-driven: a message is
/// never committed back to the broker implicitly on poll.
#[async_trait]
pub trait Consumer: Send + Sync {
    /// Block until a message is available.
    ///
    /// Built on [`Consumer::poll_timeout`], silently absorbing timeouts.
    async fn poll(&self) -> MessengerResult<Message>;

    /// Block until a message is available or `timeout` elapses
    async fn poll_timeout(&self, timeout: Duration) -> MessengerResult<Message>;

    /// Commit the message's recorded offset back to the broker
    async fn ack(&self, msg: &Message) -> MessengerResult<()>;

    /// Suspend delivery from the broker without tearing anything down
    fn pause(&self) -> MessengerResult<()>;

    /// Restart delivery after [`Consumer::pause`]
    fn resume(&self) -> MessengerResult<()>;

    /// Signal the background polling task to shut down.
    ///
    /// Idempotent and non-blocking; already-buffered messages remain
    /// consumable after the task exits.
    fn stop(&self);

    /// Wait until every buffered message has been retrieved
    async fn drain(&self);
}

/// Publishing side of a channel.
///
/// Publishing is fire-and-forget: delivery is confirmed asynchronously and
/// failures are logged, never returned to the caller.
pub trait Publisher: Send + Sync {
    /// Enqueue a message for delivery
    fn publish(&self, msg: &Message);
}

/// Registry of channels: the single authoritative mapping from channel id to
/// a running consumer or publisher.
///
/// `create_*` is idempotent for identical options and conflicts loudly for
/// differing ones; at most one underlying broker client ever exists per
/// channel id, however many callers race on creation.
pub trait Messenger: Send + Sync {
    type Consumer: Consumer + ?Sized;
    type Publisher: Publisher + ?Sized;
    type ConsumerOptions;
    type PublisherOptions;

    /// Create a consumer for the channel, or return the existing one if the
    /// options match
    fn create_consumer(
        &self,
        channel_id: &ChannelId,
        options: Self::ConsumerOptions,
    ) -> MessengerResult<Arc<Self::Consumer>>;

    /// Create a publisher for the channel, or return the existing one if the
    /// options match
    fn create_publisher(
        &self,
        channel_id: &ChannelId,
        options: Self::PublisherOptions,
    ) -> MessengerResult<Arc<Self::Publisher>>;

    /// Look up an existing consumer; never constructs
    fn get_consumer(&self, channel_id: &ChannelId) -> MessengerResult<Arc<Self::Consumer>>;

    /// Look up an existing publisher; never constructs
    fn get_publisher(&self, channel_id: &ChannelId) -> MessengerResult<Arc<Self::Publisher>>;

    /// Remove the registry entry for a consumer channel.
    ///
    /// Does not stop a consumer other owners still hold; stopping is the
    /// consumer's own responsibility.
    fn destroy_consumer(&self, channel_id: &ChannelId);

    /// Remove the registry entry for a publisher channel
    fn destroy_publisher(&self, channel_id: &ChannelId);
}
