//! Reserved message headers carrying Kafka record origin metadata
//!
//! The consumer engine tags every decoded message with these headers so that
//! `ack` can recover the exact topic, partition and offset to commit.
//! Callers must not use these ids for application data.

use crate::api::{MessengerError, MessengerResult};

pub const KAFKA_HEADER_OFFSET: &str = "KAFKA_HEADER_OFFSET";
pub const KAFKA_HEADER_TOPIC_NAME: &str = "KAFKA_HEADER_TOPIC_NAME";
pub const KAFKA_HEADER_TOPIC_PARTITION: &str = "KAFKA_HEADER_TOPIC_PARTITION";

pub fn encode_offset_header(offset: i64) -> String {
    offset.to_string()
}

pub fn decode_offset_header(value: &str) -> MessengerResult<i64> {
    value
        .parse()
        .map_err(|_| MessengerError::InvalidMessage(format!("malformed offset header: {value}")))
}

pub fn encode_partition_header(partition: i32) -> String {
    partition.to_string()
}

pub fn decode_partition_header(value: &str) -> MessengerResult<i32> {
    value
        .parse()
        .map_err(|_| MessengerError::InvalidMessage(format!("malformed partition header: {value}")))
}
