use anyhow::Context;
use channel_messenger::api::{ChannelId, Consumer, Message, Messenger, Publisher};
use channel_messenger::config::Config;
use channel_messenger::kafka::headers::{KAFKA_HEADER_OFFSET, KAFKA_HEADER_TOPIC_PARTITION};
use channel_messenger::kafka::KafkaMessenger;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "channel-messenger-cli")]
#[command(about = "Publish and consume messages over Kafka channels", long_about = None)]
struct Cli {
    /// Bootstrap servers, overriding the configuration file
    #[arg(short, long, value_delimiter = ',')]
    brokers: Option<Vec<String>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish messages to a topic
    Send {
        #[arg(short, long)]
        topic: String,

        /// Message payloads to publish, one message each
        #[arg(value_name = "MESSAGE", required = true)]
        messages: Vec<String>,
    },

    /// Consume messages from a topic and print them
    Listen {
        #[arg(short, long)]
        topic: String,

        /// Consumer group id, overriding the configuration file
        #[arg(short, long)]
        group: Option<String>,

        /// Stop after this many messages (0 = run until interrupted)
        #[arg(short, long, default_value = "0")]
        count: usize,

        /// Per-message poll timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,

        /// Commit each message after printing it
        #[arg(short, long)]
        ack: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "channel_messenger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    channel_messenger::metrics::init_messenger_metrics();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(brokers) = cli.brokers {
        config.broker.bootstrap_servers = brokers;
    }

    let messenger = KafkaMessenger::new();

    match cli.command {
        Commands::Send { topic, messages } => {
            let options = config.publisher_options(&topic)?;
            let publisher = messenger.create_publisher(&ChannelId::new(&topic), options)?;

            for payload in &messages {
                publisher.publish(&Message::new(payload.as_bytes().to_vec()));
            }
            println!("published {} message(s) to {}", messages.len(), topic);

            // Give in-flight deliveries a moment to settle before exiting
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        Commands::Listen {
            topic,
            group,
            count,
            timeout_secs,
            ack,
        } => {
            let mut options = config.consumer_options(&topic)?;
            if let Some(group) = group {
                options.set_group_id(group);
            }
            let consumer = messenger.create_consumer(&ChannelId::new(&topic), options)?;

            let mut received = 0usize;
            loop {
                let msg = consumer
                    .poll_timeout(Duration::from_secs(timeout_secs))
                    .await
                    .context("polling failed")?;

                println!(
                    "[partition {} offset {}] {}",
                    msg.header(KAFKA_HEADER_TOPIC_PARTITION).unwrap_or("?"),
                    msg.header(KAFKA_HEADER_OFFSET).unwrap_or("?"),
                    String::from_utf8_lossy(msg.payload()),
                );

                if ack {
                    consumer.ack(&msg).await?;
                }

                received += 1;
                if count > 0 && received >= count {
                    break;
                }
            }

            consumer.stop();
            consumer.drain().await;
        }
    }

    Ok(())
}
