//! Buffered Kafka consumer engine
//!
//! Converts the broker client's pull-based delivery into a queue-like,
//! thread-safe poll API. A single background task (started lazily, exactly
//! once) keeps pulling records from the broker and deposits decoded messages
//! into an unbounded FIFO buffer; any number of foreground callers block on
//! the buffer with a timeout. Because only one task appends, pop order
//! equals broker delivery order.

use crate::api::{Consumer, Header, Message, MessengerError, MessengerResult};
use crate::kafka::headers::{
    decode_offset_header, decode_partition_header, encode_offset_header, encode_partition_header,
    KAFKA_HEADER_OFFSET, KAFKA_HEADER_TOPIC_NAME, KAFKA_HEADER_TOPIC_PARTITION,
};
use crate::kafka::options::KafkaConsumerOptions;
use crate::metrics::MESSENGER_METRICS;
use async_trait::async_trait;
use parking_lot::Mutex;
use rdkafka::consumer::{CommitMode, Consumer as KafkaClient, StreamConsumer};
use rdkafka::message::Message as KafkaRecord;
use rdkafka::{Offset, TopicPartitionList};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, error, warn};

/// Bound on a single broker poll, so the loop stays responsive to `stop()`
const CONSUME_POLL_SLICE: Duration = Duration::from_secs(5);

/// Retry interval of the blocking no-timeout `poll`
const BLOCKING_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// State shared between the background polling task and foreground callers.
///
/// The background task is the sole appender; foreground pollers are the sole
/// consumers. `new_messages` fires on every append, `drained` whenever a pop
/// empties the buffer.
struct Shared {
    buffer: Mutex<VecDeque<Message>>,
    new_messages: Notify,
    drained: Notify,
    interrupted: AtomicBool,
    started: AtomicBool,
}

/// Buffered consumer for one Kafka channel
pub struct KafkaConsumer {
    client: Arc<StreamConsumer>,
    options: KafkaConsumerOptions,
    shared: Arc<Shared>,
}

impl KafkaConsumer {
    pub(crate) fn new(client: StreamConsumer, options: KafkaConsumerOptions) -> Self {
        Self {
            client: Arc::new(client),
            options,
            shared: Arc::new(Shared {
                buffer: Mutex::new(VecDeque::new()),
                new_messages: Notify::new(),
                drained: Notify::new(),
                interrupted: AtomicBool::new(false),
                started: AtomicBool::new(false),
            }),
        }
    }

    /// Options this channel was declared with
    pub fn options(&self) -> &KafkaConsumerOptions {
        &self.options
    }

    /// Launch the background polling task on first use. The compare-and-set
    /// guarantees a single task however many pollers race here.
    fn ensure_started(&self) {
        if self
            .shared
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let client = Arc::clone(&self.client);
            let shared = Arc::clone(&self.shared);
            let topic = self.options.topic_name().to_string();
            tokio::spawn(consume_loop(client, shared, topic));
        }
    }

    /// Pop the oldest buffered message, signalling drain waiters when the
    /// buffer empties
    fn try_pop(&self) -> Option<Message> {
        let mut buffer = self.shared.buffer.lock();
        let msg = buffer.pop_front();
        if msg.is_some() && buffer.is_empty() {
            self.shared.drained.notify_waiters();
        }
        msg
    }

    fn commit_message(&self, msg: &Message) -> MessengerResult<()> {
        let topic = msg
            .header(KAFKA_HEADER_TOPIC_NAME)
            .ok_or_else(|| MessengerError::InvalidMessage("missing topic name header".into()))?;
        let partition = msg
            .header(KAFKA_HEADER_TOPIC_PARTITION)
            .ok_or_else(|| MessengerError::InvalidMessage("missing partition header".into()))
            .and_then(decode_partition_header)?;
        let offset = msg
            .header(KAFKA_HEADER_OFFSET)
            .ok_or_else(|| MessengerError::InvalidMessage("missing offset header".into()))
            .and_then(decode_offset_header)?;

        let mut position = TopicPartitionList::new();
        position
            .add_partition_offset(topic, partition, Offset::Offset(offset))
            .map_err(|err| MessengerError::InvalidMessage(err.to_string()))?;
        self.client
            .commit(&position, CommitMode::Sync)
            .map_err(MessengerError::broker)?;
        Ok(())
    }
}

#[async_trait]
impl Consumer for KafkaConsumer {
    async fn poll(&self) -> MessengerResult<Message> {
        loop {
            match self.poll_timeout(BLOCKING_POLL_INTERVAL).await {
                Err(MessengerError::Timeout) => continue,
                result => return result,
            }
        }
    }

    async fn poll_timeout(&self, timeout: Duration) -> MessengerResult<Message> {
        self.ensure_started();
        let deadline = Instant::now() + timeout;
        loop {
            // Register for wakeups before checking the buffer, so an append
            // between the check and the await is never lost.
            let notified = self.shared.new_messages.notified();
            if let Some(msg) = self.try_pop() {
                return Ok(msg);
            }
            if self.shared.interrupted.load(Ordering::Acquire) {
                return Err(MessengerError::EndOfStream);
            }
            if timeout_at(deadline, notified).await.is_err() {
                return Err(MessengerError::Timeout);
            }
        }
    }

    async fn ack(&self, msg: &Message) -> MessengerResult<()> {
        self.commit_message(msg).map_err(|err| {
            let headers = msg.headers_to_string();
            error!(headers = %headers, error = %err, "Failed to ack message");
            MessengerError::ack_failed(headers, err)
        })
    }

    fn pause(&self) -> MessengerResult<()> {
        let assignment = self.client.assignment().map_err(MessengerError::broker)?;
        self.client.pause(&assignment).map_err(MessengerError::broker)
    }

    fn resume(&self) -> MessengerResult<()> {
        let assignment = self.client.assignment().map_err(MessengerError::broker)?;
        self.client.resume(&assignment).map_err(MessengerError::broker)
    }

    fn stop(&self) {
        self.shared.interrupted.store(true, Ordering::Release);
        // Wake blocked pollers so they can observe the end of stream
        self.shared.new_messages.notify_waiters();
    }

    async fn drain(&self) {
        loop {
            let notified = self.shared.drained.notified();
            if self.shared.buffer.lock().is_empty() {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for KafkaConsumer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Background polling loop: runs until `interrupted` is observed. Messages
/// already buffered stay consumable after exit.
async fn consume_loop(client: Arc<StreamConsumer>, shared: Arc<Shared>, topic: String) {
    debug!(topic = %topic, "Consumer polling task started");
    while !shared.interrupted.load(Ordering::Acquire) {
        let record = match timeout(CONSUME_POLL_SLICE, client.recv()).await {
            // Slice elapsed with nothing to read; re-check interruption
            Err(_) => continue,
            Ok(Err(err)) => {
                // A failed record must not halt the channel: log and drop
                warn!(topic = %topic, error = %err, "Dropping errored record");
                MESSENGER_METRICS
                    .records_dropped
                    .with_label_values(&[topic.as_str()])
                    .inc();
                continue;
            }
            Ok(Ok(record)) => record,
        };

        let payload = match record.payload() {
            Some(bytes) if !bytes.is_empty() => bytes.to_vec(),
            // Empty-valued records are heartbeats, not messages
            _ => continue,
        };

        let mut msg = Message::new(payload);
        msg.add_header(Header::new(
            KAFKA_HEADER_OFFSET,
            encode_offset_header(record.offset()),
        ));
        msg.add_header(Header::new(KAFKA_HEADER_TOPIC_NAME, record.topic()));
        msg.add_header(Header::new(
            KAFKA_HEADER_TOPIC_PARTITION,
            encode_partition_header(record.partition()),
        ));

        shared.buffer.lock().push_back(msg);
        MESSENGER_METRICS
            .messages_received
            .with_label_values(&[record.topic()])
            .inc();
        shared.new_messages.notify_waiters();
    }
    debug!(topic = %topic, "Consumer polling task stopped");
}
