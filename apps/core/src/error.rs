use std::time::Duration;

/// Why a poll produced no envelope.
///
/// Every variant is caught at the top of the poll cycle, logged, and
/// dropped; none of them stops the timer.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why a sensor sub-object was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("reading absent")]
    Absent,

    #[error("expected an object")]
    NotAnObject,

    #[error("field `{0}` missing")]
    MissingField(&'static str),

    #[error("field `{0}` is not a number")]
    NotANumber(&'static str),
}

#[cfg(test)]
mod tests {
    use super::{PollError, Rejection};
    use std::time::Duration;

    #[test]
    fn status_message_carries_code() {
        assert_eq!(PollError::Status(500).to_string(), "HTTP error! Status: 500");
    }

    #[test]
    fn timeout_message_in_millis() {
        let error = PollError::Timeout(Duration::from_millis(2000));
        assert_eq!(error.to_string(), "request timed out after 2000ms");
    }

    #[test]
    fn rejection_names_field() {
        assert_eq!(
            Rejection::MissingField("humidity").to_string(),
            "field `humidity` missing"
        );
    }
}
