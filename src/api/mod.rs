//! Broker-agnostic messaging surface
//!
//! Application code produces and consumes messages through the types in this
//! module without touching a broker client API directly: a [`ChannelId`]
//! names a logical channel, a [`Message`] carries an opaque payload plus
//! headers, and the [`Messenger`] registry hands out shared [`Consumer`] and
//! [`Publisher`] instances per channel.

mod channel;
mod error;
mod message;
mod messenger;

pub use channel::ChannelId;
pub use error::{MessengerError, MessengerResult};
pub use message::{Header, Message, Payload};
pub use messenger::{Consumer, Messenger, Publisher};
