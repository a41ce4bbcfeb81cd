//! Error types for messenger operations

use crate::api::channel::ChannelId;

/// Result type for messenger operations
pub type MessengerResult<T> = std::result::Result<T, MessengerError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during messenger operations
#[derive(Debug, thiserror::Error)]
pub enum MessengerError {
    /// Lookup of a channel that was never created
    #[error("Channel not declared: {0}")]
    ChannelNotDeclared(ChannelId),

    /// Attempt to reuse a channel id with different options
    #[error("Channel redeclaration with different options: {0}")]
    ChannelRedeclaration(ChannelId),

    /// Broker consumer client could not be constructed
    #[error("Failed to create consumer for channel {channel}")]
    ConsumerConstruction {
        channel: ChannelId,
        #[source]
        source: BoxedSource,
    },

    /// Broker producer client could not be constructed
    #[error("Failed to create publisher for channel {channel}")]
    PublisherConstruction {
        channel: ChannelId,
        #[source]
        source: BoxedSource,
    },

    /// No message arrived within the requested timeout
    #[error("Timeout on waiting for messages")]
    Timeout,

    /// Buffer is empty and no more messages are expected
    #[error("EOF on stream")]
    EndOfStream,

    /// Offset commit failed
    #[error("Failed to ack message with headers {headers}")]
    AckFailed {
        headers: String,
        #[source]
        source: BoxedSource,
    },

    /// Broker client operation failed
    #[error("Broker operation failed")]
    Broker(#[source] BoxedSource),

    /// Invalid option value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Message is missing or carries malformed metadata
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl MessengerError {
    pub(crate) fn consumer_construction(
        channel: ChannelId,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConsumerConstruction {
            channel,
            source: Box::new(source),
        }
    }

    pub(crate) fn publisher_construction(
        channel: ChannelId,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::PublisherConstruction {
            channel,
            source: Box::new(source),
        }
    }

    pub(crate) fn broker(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Broker(Box::new(source))
    }

    pub(crate) fn ack_failed(
        headers: String,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::AckFailed {
            headers,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = MessengerError::ChannelNotDeclared(ChannelId::new("orders"));
        assert_eq!(err.to_string(), "Channel not declared: orders");

        let err = MessengerError::ChannelRedeclaration(ChannelId::new("orders"));
        assert_eq!(
            err.to_string(),
            "Channel redeclaration with different options: orders"
        );
    }

    #[test]
    fn test_construction_error_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "broker down");
        let err = MessengerError::consumer_construction(ChannelId::new("orders"), cause);

        assert_eq!(err.to_string(), "Failed to create consumer for channel orders");
        assert!(err.source().unwrap().to_string().contains("broker down"));
    }

    #[test]
    fn test_ack_failed_carries_headers() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "commit timed out");
        let err = MessengerError::ack_failed("{offset=3}".to_string(), cause);

        assert!(err.to_string().contains("{offset=3}"));
        assert!(err.source().is_some());
    }
}
