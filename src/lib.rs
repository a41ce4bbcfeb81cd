//! Broker-agnostic messaging facade with a buffered Kafka backend
//!
//! Application code produces and consumes messages over named channels
//! without depending on a broker client API. The registry guarantees at most
//! one consumer/publisher instance per channel, however many threads race on
//! creation, and rejects silent reconfiguration of a live channel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          api: Messenger / Consumer / Publisher   │
//! ├─────────────────────────────────────────────────┤
//! │  - create_consumer()   - poll() / poll_timeout() │
//! │  - create_publisher()  - ack() / drain()         │
//! │  - get_* / destroy_*   - publish()               │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │         kafka: registry + buffered engine        │
//! ├─────────────────────────────────────────────────┤
//! │  - per-key-atomic channel registry (DashMap)     │
//! │  - one background polling task per consumer      │
//! │  - FIFO buffer, blocking poll with timeout       │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use channel_messenger::api::{ChannelId, Consumer, Message, Messenger, Publisher};
//! use channel_messenger::kafka::{KafkaConsumerOptions, KafkaMessenger, KafkaPublisherOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let messenger = KafkaMessenger::new();
//!
//!     let mut options = KafkaPublisherOptions::new();
//!     options.set_bootstrap_servers(["localhost:9092"]);
//!     options.set_topic_name("topic1");
//!     let publisher = messenger.create_publisher(&ChannelId::new("pub1"), options)?;
//!
//!     publisher.publish(&Message::new(b"hello".to_vec()));
//!
//!     let mut options = KafkaConsumerOptions::new();
//!     options.set_bootstrap_servers(["localhost:9092"]);
//!     options.set_group_id("group1");
//!     options.set_topic_name("topic1");
//!     let consumer = messenger.create_consumer(&ChannelId::new("cons1"), options)?;
//!
//!     let msg = consumer.poll_timeout(Duration::from_secs(30)).await?;
//!     consumer.ack(&msg).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod kafka;
pub mod metrics;

pub use api::{ChannelId, Consumer, Header, Message, Messenger, MessengerError, MessengerResult, Publisher};
