//! Raw event log input.

/// A raw log emitted by the identity registry.
///
/// `topics[0]` names the event, `topics[1]` carries the agent ID,
/// `topics[2]` the owner address, and `data` the ABI-encoded agent URI.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{EventLog, REGISTERED_TOPIC0};
///
/// let log = EventLog::new(
///     vec![REGISTERED_TOPIC0.to_string()],
///     "0x",
/// );
/// let topic0 = REGISTERED_TOPIC0.to_string();
/// assert_eq!(log.topic(0), Some(topic0.as_str()));
/// assert_eq!(log.topic(1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventLog {
    /// Hex-encoded 32-byte topics, in log order
    pub topics: Vec<String>,
    /// Hex-encoded data field, if the log has one
    pub data: Option<String>,
}

impl EventLog {
    /// Creates a log with topics and a data field.
    #[must_use]
    pub fn new(topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            topics,
            data: Some(data.into()),
        }
    }

    /// Creates a log that has no data field.
    #[must_use]
    pub const fn without_data(topics: Vec<String>) -> Self {
        Self { topics, data: None }
    }

    /// Returns the topic at `index`, if present.
    #[must_use]
    pub fn topic(&self, index: usize) -> Option<&str> {
        self.topics.get(index).map(String::as_str)
    }
}
