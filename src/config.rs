//! Messenger configuration loading
//!
//! File/environment configuration for applications embedding the messenger,
//! converted into channel option snapshots. Values left out of the file keep
//! their defaults; environment variables (prefix `CHANNEL_MESSENGER__`)
//! override the file.

use crate::api::{MessengerError, MessengerResult};
use crate::kafka::{Acks, KafkaConsumerOptions, KafkaPublisherOptions, OffsetReset, SecurityProtocol};
use serde::{Deserialize, Serialize};

/// Main messenger configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Broker connection settings shared by both roles
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Consumer channel settings
    #[serde(default)]
    pub consumer: ConsumerConfig,

    /// Publisher channel settings
    #[serde(default)]
    pub publisher: PublisherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Kafka bootstrap servers
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: Vec<String>,

    /// Client ID
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Security protocol (plaintext, ssl, sasl_plaintext, sasl_ssl)
    pub security_protocol: Option<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: default_bootstrap_servers(),
            client_id: default_client_id(),
            security_protocol: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Consumer group ID
    #[serde(default = "default_group_id")]
    pub group_id: String,

    /// Enable auto commit
    #[serde(default)]
    pub enable_auto_commit: bool,

    /// Offset reset policy (earliest, latest, error)
    pub auto_offset_reset: Option<String>,

    /// Session timeout in milliseconds
    pub session_timeout_ms: Option<i64>,

    /// Socket timeout in milliseconds
    pub socket_timeout_ms: Option<i64>,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            group_id: default_group_id(),
            enable_auto_commit: false,
            auto_offset_reset: None,
            session_timeout_ms: None,
            socket_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Acknowledgment mode (0, 1, all)
    pub acks: Option<String>,

    /// Linger time in milliseconds
    pub linger_ms: Option<i64>,

    /// Message timeout in milliseconds
    pub message_timeout_ms: Option<i64>,

    /// Enable idempotent delivery
    #[serde(default)]
    pub enable_idempotence: bool,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/messenger.toml".to_string());

        config::Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CHANNEL_MESSENGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Build consumer channel options for a topic
    pub fn consumer_options(&self, topic: &str) -> MessengerResult<KafkaConsumerOptions> {
        let mut options = KafkaConsumerOptions::new();
        options.set_bootstrap_servers(self.broker.bootstrap_servers.iter().cloned());
        options.set_client_id(&self.broker.client_id);
        options.set_group_id(&self.consumer.group_id);
        options.set_enable_auto_commit(self.consumer.enable_auto_commit);
        options.set_topic_name(topic);

        if let Some(protocol) = &self.broker.security_protocol {
            options.set_security_protocol(parse_security_protocol(protocol)?);
        }
        if let Some(reset) = &self.consumer.auto_offset_reset {
            options.set_auto_offset_reset(parse_offset_reset(reset)?);
        }
        if let Some(timeout) = self.consumer.session_timeout_ms {
            options.set_session_timeout_ms(timeout)?;
        }
        if let Some(timeout) = self.consumer.socket_timeout_ms {
            options.set_socket_timeout_ms(timeout)?;
        }

        Ok(options)
    }

    /// Build publisher channel options for a topic
    pub fn publisher_options(&self, topic: &str) -> MessengerResult<KafkaPublisherOptions> {
        let mut options = KafkaPublisherOptions::new();
        options.set_bootstrap_servers(self.broker.bootstrap_servers.iter().cloned());
        options.set_client_id(&self.broker.client_id);
        options.set_topic_name(topic);

        if let Some(protocol) = &self.broker.security_protocol {
            options.set_security_protocol(parse_security_protocol(protocol)?);
        }
        if let Some(acks) = &self.publisher.acks {
            options.set_acks(parse_acks(acks)?);
        }
        if let Some(linger) = self.publisher.linger_ms {
            options.set_linger_ms(linger)?;
        }
        if let Some(timeout) = self.publisher.message_timeout_ms {
            options.set_message_timeout_ms(timeout)?;
        }
        if self.publisher.enable_idempotence {
            options.set_enable_idempotence(true);
        }

        Ok(options)
    }
}

fn default_bootstrap_servers() -> Vec<String> {
    vec!["localhost:9092".to_string()]
}

fn default_client_id() -> String {
    "channel-messenger".to_string()
}

fn default_group_id() -> String {
    "channel-messenger".to_string()
}

fn parse_security_protocol(value: &str) -> MessengerResult<SecurityProtocol> {
    match value {
        "plaintext" => Ok(SecurityProtocol::Plaintext),
        "ssl" => Ok(SecurityProtocol::Ssl),
        "sasl_plaintext" => Ok(SecurityProtocol::SaslPlaintext),
        "sasl_ssl" => Ok(SecurityProtocol::SaslSsl),
        other => Err(MessengerError::Configuration(format!(
            "unknown security protocol: {other}"
        ))),
    }
}

fn parse_offset_reset(value: &str) -> MessengerResult<OffsetReset> {
    match value {
        "earliest" => Ok(OffsetReset::Earliest),
        "latest" => Ok(OffsetReset::Latest),
        "error" => Ok(OffsetReset::Error),
        other => Err(MessengerError::Configuration(format!(
            "unknown offset reset policy: {other}"
        ))),
    }
}

fn parse_acks(value: &str) -> MessengerResult<Acks> {
    match value {
        "0" => Ok(Acks::None),
        "1" => Ok(Acks::Leader),
        "all" => Ok(Acks::All),
        other => Err(MessengerError::Configuration(format!(
            "unknown acks mode: {other}"
        ))),
    }
}
