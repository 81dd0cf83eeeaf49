use thiserror::Error;

pub const DEFAULT_FEED_URL: &str = "https://thingspeak.com/channels/1417/feeds/last.json";
pub const DEFAULT_FEED_FIELD: &str = "field1";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },
    #[error("malformed feed record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("feed record has no string field `{field}`")]
    MissingField { field: String },
}

/// Source of the latest community colour name.
pub trait Feed {
    fn fetch_latest_color_name(&self) -> Result<String, FeedError>;
}

/// Extracts the colour name from the latest-entry record of the feed.
///
/// The record looks like
/// `{"created_at": "...", "entry_id": 490378, "field1": "red", "field2": "#FF0000"}`.
pub fn parse_color_name(body: &[u8], field: &str) -> Result<String, FeedError> {
    let record: serde_json::Value = serde_json::from_slice(body)?;

    record
        .get(field)
        .and_then(|value| value.as_str())
        .map(|name| name.to_owned())
        .ok_or_else(|| FeedError::MissingField {
            field: field.to_owned(),
        })
}
