//! Integration tests for the Kafka messenger against an in-process mock
//! cluster (no external broker required).

use channel_messenger::api::{ChannelId, Consumer, Message, Messenger, MessengerError, Publisher};
use channel_messenger::kafka::headers::{
    KAFKA_HEADER_OFFSET, KAFKA_HEADER_TOPIC_NAME, KAFKA_HEADER_TOPIC_PARTITION,
};
use channel_messenger::kafka::{
    KafkaConsumerOptions, KafkaMessenger, KafkaPublisherOptions, OffsetReset,
};
use rdkafka::mocking::MockCluster;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn publisher_options(servers: &str, topic: &str) -> KafkaPublisherOptions {
    let mut options = KafkaPublisherOptions::new();
    options.set_bootstrap_servers([servers]);
    options.set_topic_name(topic);
    options
}

fn consumer_options(servers: &str, topic: &str, group: &str) -> KafkaConsumerOptions {
    let mut options = KafkaConsumerOptions::new();
    options.set_bootstrap_servers([servers]);
    options.set_topic_name(topic);
    options.set_group_id(group);
    options.set_auto_offset_reset(OffsetReset::Earliest);
    options
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn messages_are_sent_and_received_over_topic() {
    let cluster = MockCluster::new(3).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_options(&servers, "topic1"))
        .unwrap();
    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    publisher.publish(&Message::new(b"Test message 1".to_vec()));
    publisher.publish(&Message::new(b"Test message 2".to_vec()));
    publisher.publish(&Message::new(b"Test message 3".to_vec()));

    let mut received = Vec::new();
    for _ in 0..3 {
        received.push(consumer.poll_timeout(Duration::from_secs(30)).await.unwrap());
    }

    let payloads: HashSet<String> = received
        .iter()
        .map(|msg| String::from_utf8(msg.payload().to_vec()).unwrap())
        .collect();
    assert!(payloads.contains("Test message 1"));
    assert!(payloads.contains("Test message 2"));
    assert!(payloads.contains("Test message 3"));

    for msg in &received {
        assert_eq!(msg.header(KAFKA_HEADER_TOPIC_NAME), Some("topic1"));
        assert!(msg.header(KAFKA_HEADER_OFFSET).is_some());
        assert!(msg.header(KAFKA_HEADER_TOPIC_PARTITION).is_some());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_partition_delivery_preserves_order() {
    let cluster = MockCluster::new(1).unwrap();
    cluster.create_topic("ordered", 1, 1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_options(&servers, "ordered"))
        .unwrap();
    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "ordered", "group1"),
        )
        .unwrap();

    for payload in ["1", "2", "3"] {
        publisher.publish(&Message::new(payload.as_bytes().to_vec()));
    }

    for expected in ["1", "2", "3"] {
        let msg = consumer.poll_timeout(Duration::from_secs(30)).await.unwrap();
        assert_eq!(msg.payload(), expected.as_bytes());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn polling_is_interrupted_on_timeout() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    let started = Instant::now();
    let result = consumer.poll_timeout(Duration::from_secs(2)).await;

    assert!(matches!(result, Err(MessengerError::Timeout)));
    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn redeclaration_with_different_options_is_not_allowed() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let mut publisher_opts = publisher_options(&servers, "topic1");
    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_opts.clone())
        .unwrap();

    let mut consumer_opts = consumer_options(&servers, "topic1", "group1");
    let consumer = messenger
        .create_consumer(&ChannelId::new("cons1"), consumer_opts.clone())
        .unwrap();

    publisher_opts.set_batch_size(8).unwrap();
    consumer_opts.set_group_id("some");

    let publisher_err = messenger.create_publisher(&ChannelId::new("pub1"), publisher_opts);
    assert!(matches!(
        publisher_err,
        Err(MessengerError::ChannelRedeclaration(_))
    ));

    let consumer_err = messenger.create_consumer(&ChannelId::new("cons1"), consumer_opts);
    assert!(matches!(
        consumer_err,
        Err(MessengerError::ChannelRedeclaration(_))
    ));

    // 1 held by messenger and 1 held by local var; the failed attempts left
    // the existing instances untouched
    assert_eq!(Arc::strong_count(&publisher), 2);
    assert_eq!(Arc::strong_count(&consumer), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn channel_is_reused_when_created_with_same_options() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher_opts = publisher_options(&servers, "topic1");
    let consumer_opts = consumer_options(&servers, "topic1", "group1");

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_opts.clone())
        .unwrap();
    let consumer = messenger
        .create_consumer(&ChannelId::new("cons1"), consumer_opts.clone())
        .unwrap();

    let publisher2 = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_opts)
        .unwrap();
    let consumer2 = messenger
        .create_consumer(&ChannelId::new("cons1"), consumer_opts)
        .unwrap();

    assert!(Arc::ptr_eq(&publisher, &publisher2));
    assert!(Arc::ptr_eq(&consumer, &consumer2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lookup_of_undeclared_channel_fails() {
    let messenger = KafkaMessenger::new();

    assert!(matches!(
        messenger.get_consumer(&ChannelId::new("nowhere")),
        Err(MessengerError::ChannelNotDeclared(_))
    ));
    assert!(matches!(
        messenger.get_publisher(&ChannelId::new("nowhere")),
        Err(MessengerError::ChannelNotDeclared(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creation_yields_a_single_instance() {
    const CREATORS: usize = 8;

    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = Arc::new(KafkaMessenger::new());

    let mut tasks = Vec::new();
    for _ in 0..CREATORS {
        let messenger = Arc::clone(&messenger);
        let options = consumer_options(&servers, "topic1", "group1");
        tasks.push(tokio::spawn(async move {
            messenger
                .create_consumer(&ChannelId::new("cons1"), options)
                .unwrap()
        }));
    }

    let mut consumers = Vec::new();
    for task in tasks {
        consumers.push(task.await.unwrap());
    }

    for consumer in &consumers[1..] {
        assert!(Arc::ptr_eq(&consumers[0], consumer));
    }
    assert_eq!(Arc::strong_count(&consumers[0]), CREATORS + 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stopped_consumer_reports_end_of_stream_once_empty() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    // First poll starts the background task
    let result = consumer.poll_timeout(Duration::from_secs(1)).await;
    assert!(matches!(result, Err(MessengerError::Timeout)));

    consumer.stop();
    consumer.stop(); // idempotent

    let result = consumer.poll_timeout(Duration::from_secs(30)).await;
    assert!(matches!(result, Err(MessengerError::EndOfStream)));

    // The no-timeout variant converges instead of hanging
    let result = consumer.poll().await;
    assert!(matches!(result, Err(MessengerError::EndOfStream)));

    // Nothing buffered, so drain returns immediately
    consumer.drain().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn drain_completes_after_buffered_messages_are_polled() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_options(&servers, "topic1"))
        .unwrap();
    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    publisher.publish(&Message::new(b"only".to_vec()));

    let msg = consumer.poll_timeout(Duration::from_secs(30)).await.unwrap();
    assert_eq!(msg.payload(), b"only");

    consumer.stop();
    consumer.drain().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ack_commits_polled_message() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_options(&servers, "topic1"))
        .unwrap();
    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    publisher.publish(&Message::new(b"commit me".to_vec()));

    let msg = consumer.poll_timeout(Duration::from_secs(30)).await.unwrap();
    consumer.ack(&msg).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ack_without_origin_headers_fails() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let publisher = messenger
        .create_publisher(&ChannelId::new("pub1"), publisher_options(&servers, "topic1"))
        .unwrap();
    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    let stray = Message::new(b"never polled".to_vec());
    let result = consumer.ack(&stray).await;
    assert!(matches!(result, Err(MessengerError::AckFailed { .. })));

    // The failed ack leaves the consumer usable
    publisher.publish(&Message::new(b"still alive".to_vec()));
    let msg = consumer.poll_timeout(Duration::from_secs(30)).await.unwrap();
    assert_eq!(msg.payload(), b"still alive");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn destroyed_channel_is_gone_from_registry_but_stays_usable() {
    let cluster = MockCluster::new(1).unwrap();
    let servers = cluster.bootstrap_servers();
    let messenger = KafkaMessenger::new();

    let consumer = messenger
        .create_consumer(
            &ChannelId::new("cons1"),
            consumer_options(&servers, "topic1", "group1"),
        )
        .unwrap();

    messenger.destroy_consumer(&ChannelId::new("cons1"));
    assert!(matches!(
        messenger.get_consumer(&ChannelId::new("cons1")),
        Err(MessengerError::ChannelNotDeclared(_))
    ));

    // Deregistration does not stop the instance held by this owner
    let result = consumer.poll_timeout(Duration::from_secs(1)).await;
    assert!(matches!(result, Err(MessengerError::Timeout)));
}
