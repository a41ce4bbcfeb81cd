//! Kafka backend
//!
//! Implements the broker-agnostic surface on top of `rdkafka`: the
//! [`KafkaMessenger`] registry hands out per-channel [`KafkaConsumer`] and
//! [`KafkaPublisher`] instances; record origin metadata travels in the
//! reserved headers from [`headers`].

mod consumer;
pub mod headers;
mod messenger;
mod options;
mod publisher;

pub use consumer::KafkaConsumer;
pub use messenger::KafkaMessenger;
pub use options::{
    Acks, AssignmentStrategy, IsolationLevel, KafkaConsumerOptions, KafkaPublisherOptions,
    OffsetReset, Partitioner, SecurityProtocol,
};
pub use publisher::KafkaPublisher;
