use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Reads an explicit JSON `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a timestamp string or an epoch number (milliseconds), keeping it
/// as text so unparseable values can still be shown verbatim.
fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a timestamp string or number, got {other}"
        ))),
    }
}

/// A single post returned by `GET /tweets/{handle}`, annotated by the
/// moderation backend. Field names on the wire follow the backend's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "tweetId")]
    pub post_id: String,
    #[serde(rename = "userName")]
    pub author_handle: String,
    #[serde(rename = "name", default, deserialize_with = "null_as_default")]
    pub author_display_name: String,
    #[serde(rename = "profileImageUrl", default, deserialize_with = "null_as_default")]
    pub author_avatar_url: String,

    #[serde(rename = "content", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "createdAt", default, deserialize_with = "timestamp_text")]
    pub created_at: String,

    #[serde(rename = "replyCount", default, deserialize_with = "null_as_default")]
    pub reply_count: u64,
    #[serde(rename = "retweetCount", default, deserialize_with = "null_as_default")]
    pub repost_count: u64,
    #[serde(rename = "favCount", default, deserialize_with = "null_as_default")]
    pub like_count: u64,
    #[serde(rename = "viewCount", default, deserialize_with = "null_as_default")]
    pub view_count: u64,

    /// 0 means "not flagged".
    #[serde(rename = "hateScore", default, deserialize_with = "null_as_default")]
    pub hate_score: f64,
    #[serde(rename = "isOffensive", default, deserialize_with = "null_as_default")]
    pub is_offensive: bool,

    /// Flatten any fields we didn't explicitly define so we don't lose them.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Post {
    /// Parses `created_at`, accepting RFC 3339, the classic Twitter format
    /// (`Wed Oct 10 20:19:24 +0000 2018`) and epoch milliseconds.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y"))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis))
    }
}

/// The top-level body of a successful backend response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetsResponse {
    /// Absent while a first scan has produced nothing yet.
    #[serde(default)]
    pub tweets: Option<Vec<Post>>,
    #[serde(rename = "isScanning", default, deserialize_with = "null_as_default")]
    pub is_scanning: bool,
    #[serde(rename = "isFirstTime", default, deserialize_with = "null_as_default")]
    pub is_first_time: bool,
    #[serde(default)]
    pub message: Option<String>,
}
