use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one row this system ever reads or writes.
pub const RECORD_ID: i64 = 1;

pub const DEFAULT_SEND_TIME: &str = "08:20";
pub const DEFAULT_TO: &str = "edsimms12@gmail.com";
pub const DEFAULT_CC: &str = "mail@bradsimms.com, ryansimms@gmail.com";

/// Singleton email record as stored remotely. Columns are nullable until the
/// first save, so everything but `id` is an `Option`; the accessors apply the
/// documented fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailRecord {
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub send_time: Option<String>,
    #[serde(default)]
    pub to_emails: Option<String>,
    #[serde(default)]
    pub cc_emails: Option<String>,
    #[serde(default)]
    pub last_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for EmailRecord {
    fn default() -> Self {
        Self {
            id: RECORD_ID,
            content: None,
            send_time: None,
            to_emails: None,
            cc_emails: None,
            last_sent_at: None,
            updated_at: None,
        }
    }
}

impl EmailRecord {
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn send_time(&self) -> &str {
        non_empty(self.send_time.as_deref()).unwrap_or(DEFAULT_SEND_TIME)
    }

    pub fn to_emails(&self) -> &str {
        non_empty(self.to_emails.as_deref()).unwrap_or(DEFAULT_TO)
    }

    pub fn cc_emails(&self) -> &str {
        non_empty(self.cc_emails.as_deref()).unwrap_or(DEFAULT_CC)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// The four editable fields, as posted by the editor page. `Save` writes
/// exactly these plus a fresh `updated_at`; it never touches `last_sent_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveFields {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub send_time: String,
    #[serde(default)]
    pub to_emails: String,
    #[serde(default)]
    pub cc_emails: String,
}
