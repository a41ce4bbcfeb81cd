//! Message envelope and header value types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque message payload
pub type Payload = Vec<u8>;

/// A single key/value message header.
///
/// Headers carry metadata next to the payload; a reserved subset is used by
/// broker backends to record record origin (topic, partition, offset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    id: String,
    value: String,
}

impl Header {
    /// Create a header from an id and a value
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Header id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.value)
    }
}

/// Message envelope: opaque byte payload plus a header map.
///
/// The payload is never null; an empty payload is valid. Header ids are
/// unique, insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    headers: HashMap<String, Header>,
    payload: Payload,
    id: Option<u64>,
}

impl Message {
    /// Create a message from a payload
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            headers: HashMap::new(),
            payload: payload.into(),
            id: None,
        }
    }

    /// Create a message from headers and a payload
    pub fn with_headers(headers: impl IntoIterator<Item = Header>, payload: impl Into<Payload>) -> Self {
        let mut msg = Self::new(payload);
        for header in headers {
            msg.add_header(header);
        }
        msg
    }

    /// Add a header, replacing any existing header with the same id
    pub fn add_header(&mut self, header: Header) {
        self.headers.insert(header.id().to_string(), header);
    }

    /// Look up a header value by id
    pub fn header(&self, id: &str) -> Option<&str> {
        self.headers.get(id).map(Header::value)
    }

    /// All headers, keyed by id
    pub fn headers(&self) -> &HashMap<String, Header> {
        &self.headers
    }

    /// Message payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replace the payload
    pub fn set_payload(&mut self, payload: impl Into<Payload>) {
        self.payload = payload.into();
    }

    /// Optional numeric message id
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Set the numeric message id
    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    /// Render all headers as `{id=value,...}` for diagnostics
    pub fn headers_to_string(&self) -> String {
        let mut rendered: Vec<String> = self.headers.values().map(Header::to_string).collect();
        rendered.sort();
        format!("{{{}}}", rendered.join(","))
    }
}
