//! Kafka channel option snapshots
//!
//! Options are bundles of named, independently-optional properties. Each
//! property validates its value on set and renders the librdkafka serialized
//! form, used both to fill an [`rdkafka::ClientConfig`] and for
//! human-readable logging. Snapshot equality over all property values is the
//! basis for redeclaration conflict detection in the registry.

use crate::api::{MessengerError, MessengerResult};
use rdkafka::ClientConfig;
use std::fmt;

/// Serialized-form rendering shared by every property kind
trait ConfigProperty {
    fn name(&self) -> &'static str;

    /// librdkafka serialized form, `None` while unset
    fn render(&self) -> Option<String>;

    fn fill_config(&self, config: &mut ClientConfig) {
        if let Some(value) = self.render() {
            config.set(self.name(), value);
        }
    }

    fn describe(&self) -> Option<String> {
        self.render().map(|value| format!("{} = {}", self.name(), value))
    }
}

/// Free-form string property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringProperty {
    name: &'static str,
    value: Option<String>,
}

impl StringProperty {
    const fn unset(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

impl ConfigProperty for StringProperty {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self) -> Option<String> {
        self.value.clone()
    }
}

/// Boolean property rendered as `true`/`false`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolProperty {
    name: &'static str,
    value: Option<bool>,
}

impl BoolProperty {
    const fn unset(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn value(&self) -> Option<bool> {
        self.value
    }

    fn set(&mut self, value: bool) {
        self.value = Some(value);
    }
}

impl ConfigProperty for BoolProperty {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self) -> Option<String> {
        self.value.map(|v| if v { "true".into() } else { "false".into() })
    }
}

/// Integer property constrained to an inclusive range, validated on set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntProperty {
    name: &'static str,
    min: i64,
    max: i64,
    value: Option<i64>,
}

impl IntProperty {
    const fn unset(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            min,
            max,
            value: None,
        }
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    fn set(&mut self, value: i64) -> MessengerResult<()> {
        if value < self.min || value > self.max {
            return Err(MessengerError::Configuration(format!(
                "{} value {} is out of range [{}, {}]",
                self.name, value, self.min, self.max
            )));
        }
        self.value = Some(value);
        Ok(())
    }
}

impl ConfigProperty for IntProperty {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self) -> Option<String> {
        self.value.map(|v| v.to_string())
    }
}

/// String-list property rendered comma-joined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProperty {
    name: &'static str,
    value: Option<Vec<String>>,
}

impl ListProperty {
    const fn unset(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn value(&self) -> Option<&[String]> {
        self.value.as_deref()
    }

    fn set(&mut self, value: impl IntoIterator<Item = impl Into<String>>) {
        self.value = Some(value.into_iter().map(Into::into).collect());
    }
}

impl ConfigProperty for ListProperty {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self) -> Option<String> {
        self.value.as_ref().map(|v| v.join(","))
    }
}

/// Closed-set property backed by an option enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumProperty<E> {
    name: &'static str,
    value: Option<E>,
}

impl<E: OptionEnum> EnumProperty<E> {
    const fn unset(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn value(&self) -> Option<E> {
        self.value
    }

    fn set(&mut self, value: E) {
        self.value = Some(value);
    }
}

impl<E: OptionEnum> ConfigProperty for EnumProperty<E> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self) -> Option<String> {
        self.value.map(|v| v.as_config_str().to_string())
    }
}

/// Enum values with a fixed librdkafka spelling
pub trait OptionEnum: Copy + PartialEq + Eq {
    fn as_config_str(&self) -> &'static str;
}

/// `isolation.level`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
}

impl OptionEnum for IsolationLevel {
    fn as_config_str(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "read_uncommitted",
            IsolationLevel::ReadCommitted => "read_committed",
        }
    }
}

/// `auto.offset.reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    Latest,
    Error,
}

impl OptionEnum for OffsetReset {
    fn as_config_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
            OffsetReset::Error => "error",
        }
    }
}

/// `security.protocol`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityProtocol {
    Plaintext,
    Ssl,
    SaslPlaintext,
    SaslSsl,
}

impl OptionEnum for SecurityProtocol {
    fn as_config_str(&self) -> &'static str {
        match self {
            SecurityProtocol::Plaintext => "plaintext",
            SecurityProtocol::Ssl => "ssl",
            SecurityProtocol::SaslPlaintext => "sasl_plaintext",
            SecurityProtocol::SaslSsl => "sasl_ssl",
        }
    }
}

/// `partition.assignment.strategy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStrategy {
    Range,
    RoundRobin,
    CooperativeSticky,
}

impl OptionEnum for AssignmentStrategy {
    fn as_config_str(&self) -> &'static str {
        match self {
            AssignmentStrategy::Range => "range",
            AssignmentStrategy::RoundRobin => "roundrobin",
            AssignmentStrategy::CooperativeSticky => "cooperative-sticky",
        }
    }
}

/// `acks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acks {
    None,
    Leader,
    All,
}

impl OptionEnum for Acks {
    fn as_config_str(&self) -> &'static str {
        match self {
            Acks::None => "0",
            Acks::Leader => "1",
            Acks::All => "all",
        }
    }
}

/// `partitioner`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partitioner {
    Random,
    Consistent,
    ConsistentRandom,
    Murmur2,
    Murmur2Random,
    Fnv1a,
    Fnv1aRandom,
}

impl OptionEnum for Partitioner {
    fn as_config_str(&self) -> &'static str {
        match self {
            Partitioner::Random => "random",
            Partitioner::Consistent => "consistent",
            Partitioner::ConsistentRandom => "consistent_random",
            Partitioner::Murmur2 => "murmur2",
            Partitioner::Murmur2Random => "murmur2_random",
            Partitioner::Fnv1a => "fnv1a",
            Partitioner::Fnv1aRandom => "fnv1a_random",
        }
    }
}

/// Consumer channel configuration snapshot.
///
/// Immutable once handed to the registry; equality over every property value
/// decides whether a second `create_consumer` call reuses or conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaConsumerOptions {
    bootstrap_servers: ListProperty,
    group_id: StringProperty,
    client_id: StringProperty,
    enable_auto_commit: BoolProperty,
    auto_offset_reset: EnumProperty<OffsetReset>,
    enable_partition_eof: BoolProperty,
    queued_min_messages: IntProperty,
    session_timeout_ms: IntProperty,
    socket_timeout_ms: IntProperty,
    isolation_level: EnumProperty<IsolationLevel>,
    partition_assignment_strategy: EnumProperty<AssignmentStrategy>,
    security_protocol: EnumProperty<SecurityProtocol>,
    topic_name: String,
}

impl Default for KafkaConsumerOptions {
    fn default() -> Self {
        Self {
            bootstrap_servers: ListProperty::unset("bootstrap.servers"),
            group_id: StringProperty::unset("group.id"),
            client_id: StringProperty::unset("client.id"),
            enable_auto_commit: BoolProperty::unset("enable.auto.commit"),
            auto_offset_reset: EnumProperty::unset("auto.offset.reset"),
            enable_partition_eof: BoolProperty::unset("enable.partition.eof"),
            queued_min_messages: IntProperty::unset("queued.min.messages", 1, 10_000_000),
            session_timeout_ms: IntProperty::unset("session.timeout.ms", 1, 3_600_000),
            socket_timeout_ms: IntProperty::unset("socket.timeout.ms", 10, 300_000),
            isolation_level: EnumProperty::unset("isolation.level"),
            partition_assignment_strategy: EnumProperty::unset("partition.assignment.strategy"),
            security_protocol: EnumProperty::unset("security.protocol"),
            topic_name: String::new(),
        }
    }
}

impl KafkaConsumerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bootstrap_servers(&mut self, servers: impl IntoIterator<Item = impl Into<String>>) {
        self.bootstrap_servers.set(servers);
    }

    pub fn bootstrap_servers(&self) -> Option<&[String]> {
        self.bootstrap_servers.value()
    }

    pub fn set_group_id(&mut self, group_id: impl Into<String>) {
        self.group_id.set(group_id);
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.value()
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id.set(client_id);
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.value()
    }

    pub fn set_enable_auto_commit(&mut self, enable: bool) {
        self.enable_auto_commit.set(enable);
    }

    pub fn enable_auto_commit(&self) -> Option<bool> {
        self.enable_auto_commit.value()
    }

    pub fn set_auto_offset_reset(&mut self, reset: OffsetReset) {
        self.auto_offset_reset.set(reset);
    }

    pub fn auto_offset_reset(&self) -> Option<OffsetReset> {
        self.auto_offset_reset.value()
    }

    pub fn set_enable_partition_eof(&mut self, enable: bool) {
        self.enable_partition_eof.set(enable);
    }

    pub fn enable_partition_eof(&self) -> Option<bool> {
        self.enable_partition_eof.value()
    }

    pub fn set_queued_min_messages(&mut self, value: i64) -> MessengerResult<()> {
        self.queued_min_messages.set(value)
    }

    pub fn queued_min_messages(&self) -> Option<i64> {
        self.queued_min_messages.value()
    }

    pub fn set_session_timeout_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.session_timeout_ms.set(value)
    }

    pub fn session_timeout_ms(&self) -> Option<i64> {
        self.session_timeout_ms.value()
    }

    pub fn set_socket_timeout_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.socket_timeout_ms.set(value)
    }

    pub fn socket_timeout_ms(&self) -> Option<i64> {
        self.socket_timeout_ms.value()
    }

    pub fn set_isolation_level(&mut self, level: IsolationLevel) {
        self.isolation_level.set(level);
    }

    pub fn isolation_level(&self) -> Option<IsolationLevel> {
        self.isolation_level.value()
    }

    pub fn set_partition_assignment_strategy(&mut self, strategy: AssignmentStrategy) {
        self.partition_assignment_strategy.set(strategy);
    }

    pub fn partition_assignment_strategy(&self) -> Option<AssignmentStrategy> {
        self.partition_assignment_strategy.value()
    }

    pub fn set_security_protocol(&mut self, protocol: SecurityProtocol) {
        self.security_protocol.set(protocol);
    }

    pub fn security_protocol(&self) -> Option<SecurityProtocol> {
        self.security_protocol.value()
    }

    pub fn set_topic_name(&mut self, topic_name: impl Into<String>) {
        self.topic_name = topic_name.into();
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// Render the set properties into a broker client configuration
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        for property in self.properties() {
            property.fill_config(&mut config);
        }
        config
    }

    fn properties(&self) -> [&dyn ConfigProperty; 12] {
        [
            &self.bootstrap_servers,
            &self.group_id,
            &self.client_id,
            &self.enable_auto_commit,
            &self.auto_offset_reset,
            &self.enable_partition_eof,
            &self.queued_min_messages,
            &self.session_timeout_ms,
            &self.socket_timeout_ms,
            &self.isolation_level,
            &self.partition_assignment_strategy,
            &self.security_protocol,
        ]
    }
}

impl fmt::Display for KafkaConsumerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_options(f, &self.topic_name, self.properties().into_iter())
    }
}

/// Publisher channel configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaPublisherOptions {
    bootstrap_servers: ListProperty,
    client_id: StringProperty,
    acks: EnumProperty<Acks>,
    queue_buffering_max_messages: IntProperty,
    queue_buffering_max_kbytes: IntProperty,
    linger_ms: IntProperty,
    batch_num_messages: IntProperty,
    batch_size: IntProperty,
    message_max_bytes: IntProperty,
    message_timeout_ms: IntProperty,
    request_timeout_ms: IntProperty,
    partitioner: EnumProperty<Partitioner>,
    max_in_flight: IntProperty,
    enable_idempotence: BoolProperty,
    transactional_id: StringProperty,
    transaction_timeout_ms: IntProperty,
    security_protocol: EnumProperty<SecurityProtocol>,
    topic_name: String,
}

impl Default for KafkaPublisherOptions {
    fn default() -> Self {
        Self {
            bootstrap_servers: ListProperty::unset("bootstrap.servers"),
            client_id: StringProperty::unset("client.id"),
            acks: EnumProperty::unset("acks"),
            queue_buffering_max_messages: IntProperty::unset(
                "queue.buffering.max.messages",
                1,
                10_000_000,
            ),
            queue_buffering_max_kbytes: IntProperty::unset(
                "queue.buffering.max.kbytes",
                1,
                2_147_483_647,
            ),
            linger_ms: IntProperty::unset("linger.ms", 0, 900_000),
            batch_num_messages: IntProperty::unset("batch.num.messages", 1, 1_000_000),
            batch_size: IntProperty::unset("batch.size", 1, 2_147_483_647),
            message_max_bytes: IntProperty::unset("message.max.bytes", 1000, 1_000_000_000),
            message_timeout_ms: IntProperty::unset("message.timeout.ms", 0, 2_147_483_647),
            request_timeout_ms: IntProperty::unset("request.timeout.ms", 1, 900_000),
            partitioner: EnumProperty::unset("partitioner"),
            max_in_flight: IntProperty::unset("max.in.flight", 1, 1_000_000),
            enable_idempotence: BoolProperty::unset("enable.idempotence"),
            transactional_id: StringProperty::unset("transactional.id"),
            transaction_timeout_ms: IntProperty::unset("transaction.timeout.ms", 1000, 2_147_483_647),
            security_protocol: EnumProperty::unset("security.protocol"),
            topic_name: String::new(),
        }
    }
}

impl KafkaPublisherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bootstrap_servers(&mut self, servers: impl IntoIterator<Item = impl Into<String>>) {
        self.bootstrap_servers.set(servers);
    }

    pub fn bootstrap_servers(&self) -> Option<&[String]> {
        self.bootstrap_servers.value()
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id.set(client_id);
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.value()
    }

    pub fn set_acks(&mut self, acks: Acks) {
        self.acks.set(acks);
    }

    pub fn acks(&self) -> Option<Acks> {
        self.acks.value()
    }

    pub fn set_queue_buffering_max_messages(&mut self, value: i64) -> MessengerResult<()> {
        self.queue_buffering_max_messages.set(value)
    }

    pub fn queue_buffering_max_messages(&self) -> Option<i64> {
        self.queue_buffering_max_messages.value()
    }

    pub fn set_queue_buffering_max_kbytes(&mut self, value: i64) -> MessengerResult<()> {
        self.queue_buffering_max_kbytes.set(value)
    }

    pub fn queue_buffering_max_kbytes(&self) -> Option<i64> {
        self.queue_buffering_max_kbytes.value()
    }

    pub fn set_linger_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.linger_ms.set(value)
    }

    pub fn linger_ms(&self) -> Option<i64> {
        self.linger_ms.value()
    }

    pub fn set_batch_num_messages(&mut self, value: i64) -> MessengerResult<()> {
        self.batch_num_messages.set(value)
    }

    pub fn batch_num_messages(&self) -> Option<i64> {
        self.batch_num_messages.value()
    }

    pub fn set_batch_size(&mut self, value: i64) -> MessengerResult<()> {
        self.batch_size.set(value)
    }

    pub fn batch_size(&self) -> Option<i64> {
        self.batch_size.value()
    }

    pub fn set_message_max_bytes(&mut self, value: i64) -> MessengerResult<()> {
        self.message_max_bytes.set(value)
    }

    pub fn message_max_bytes(&self) -> Option<i64> {
        self.message_max_bytes.value()
    }

    pub fn set_message_timeout_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.message_timeout_ms.set(value)
    }

    pub fn message_timeout_ms(&self) -> Option<i64> {
        self.message_timeout_ms.value()
    }

    pub fn set_request_timeout_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.request_timeout_ms.set(value)
    }

    pub fn request_timeout_ms(&self) -> Option<i64> {
        self.request_timeout_ms.value()
    }

    pub fn set_partitioner(&mut self, partitioner: Partitioner) {
        self.partitioner.set(partitioner);
    }

    pub fn partitioner(&self) -> Option<Partitioner> {
        self.partitioner.value()
    }

    pub fn set_max_in_flight(&mut self, value: i64) -> MessengerResult<()> {
        self.max_in_flight.set(value)
    }

    pub fn max_in_flight(&self) -> Option<i64> {
        self.max_in_flight.value()
    }

    pub fn set_enable_idempotence(&mut self, enable: bool) {
        self.enable_idempotence.set(enable);
    }

    pub fn enable_idempotence(&self) -> Option<bool> {
        self.enable_idempotence.value()
    }

    pub fn set_transactional_id(&mut self, id: impl Into<String>) {
        self.transactional_id.set(id);
    }

    pub fn transactional_id(&self) -> Option<&str> {
        self.transactional_id.value()
    }

    pub fn set_transaction_timeout_ms(&mut self, value: i64) -> MessengerResult<()> {
        self.transaction_timeout_ms.set(value)
    }

    pub fn transaction_timeout_ms(&self) -> Option<i64> {
        self.transaction_timeout_ms.value()
    }

    pub fn set_security_protocol(&mut self, protocol: SecurityProtocol) {
        self.security_protocol.set(protocol);
    }

    pub fn security_protocol(&self) -> Option<SecurityProtocol> {
        self.security_protocol.value()
    }

    pub fn set_topic_name(&mut self, topic_name: impl Into<String>) {
        self.topic_name = topic_name.into();
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// Render the set properties into a broker client configuration
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        for property in self.properties() {
            property.fill_config(&mut config);
        }
        config
    }

    fn properties(&self) -> [&dyn ConfigProperty; 17] {
        [
            &self.bootstrap_servers,
            &self.client_id,
            &self.acks,
            &self.queue_buffering_max_messages,
            &self.queue_buffering_max_kbytes,
            &self.linger_ms,
            &self.batch_num_messages,
            &self.batch_size,
            &self.message_max_bytes,
            &self.message_timeout_ms,
            &self.request_timeout_ms,
            &self.partitioner,
            &self.max_in_flight,
            &self.enable_idempotence,
            &self.transactional_id,
            &self.transaction_timeout_ms,
            &self.security_protocol,
        ]
    }
}

impl fmt::Display for KafkaPublisherOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_options(f, &self.topic_name, self.properties().into_iter())
    }
}

fn format_options<'a>(
    f: &mut fmt::Formatter<'_>,
    topic_name: &str,
    properties: impl Iterator<Item = &'a dyn ConfigProperty>,
) -> fmt::Result {
    let mut tokens: Vec<String> = Vec::new();
    if !topic_name.is_empty() {
        tokens.push(format!("topic = {}", topic_name));
    }
    tokens.extend(properties.filter_map(ConfigProperty::describe));
    write!(f, "{{{}}}", tokens.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_options_equality() {
        let mut a = KafkaConsumerOptions::new();
        a.set_bootstrap_servers(["localhost:9092"]);
        a.set_topic_name("topic1");

        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_group_id("some");
        assert_ne!(a, b);
    }

    #[test]
    fn test_publisher_options_equality() {
        let mut a = KafkaPublisherOptions::new();
        a.set_bootstrap_servers(["localhost:9092"]);
        a.set_topic_name("topic1");

        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_batch_size(8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_int_property_rejects_out_of_range() {
        let mut options = KafkaConsumerOptions::new();
        assert!(options.set_session_timeout_ms(0).is_err());
        assert!(options.set_session_timeout_ms(3_600_001).is_err());
        assert!(options.set_session_timeout_ms(30_000).is_ok());
        assert_eq!(options.session_timeout_ms(), Some(30_000));
    }

    #[test]
    fn test_rejected_value_leaves_property_unset() {
        let mut options = KafkaPublisherOptions::new();
        assert!(options.set_linger_ms(-1).is_err());
        assert_eq!(options.linger_ms(), None);
    }

    #[test]
    fn test_client_config_rendering() {
        let mut options = KafkaConsumerOptions::new();
        options.set_bootstrap_servers(["host1:9092", "host2:9092"]);
        options.set_group_id("group1");
        options.set_enable_auto_commit(false);
        options.set_auto_offset_reset(OffsetReset::Earliest);
        options.set_session_timeout_ms(30_000).unwrap();

        let config = options.to_client_config();
        assert_eq!(config.get("bootstrap.servers"), Some("host1:9092,host2:9092"));
        assert_eq!(config.get("group.id"), Some("group1"));
        assert_eq!(config.get("enable.auto.commit"), Some("false"));
        assert_eq!(config.get("auto.offset.reset"), Some("earliest"));
        assert_eq!(config.get("session.timeout.ms"), Some("30000"));
        assert_eq!(config.get("client.id"), None);
    }

    #[test]
    fn test_enum_rendering() {
        let mut options = KafkaPublisherOptions::new();
        options.set_acks(Acks::All);
        options.set_partitioner(Partitioner::Murmur2Random);
        options.set_security_protocol(SecurityProtocol::SaslSsl);

        let config = options.to_client_config();
        assert_eq!(config.get("acks"), Some("all"));
        assert_eq!(config.get("partitioner"), Some("murmur2_random"));
        assert_eq!(config.get("security.protocol"), Some("sasl_ssl"));
    }

    #[test]
    fn test_display_skips_unset_properties() {
        let mut options = KafkaConsumerOptions::new();
        options.set_topic_name("topic1");
        options.set_group_id("group1");

        let rendered = options.to_string();
        assert_eq!(rendered, "{topic = topic1,group.id = group1}");
    }
}
