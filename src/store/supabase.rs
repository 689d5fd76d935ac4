use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::TideError;
use crate::store::models::{EmailRecord, RECORD_ID, SaveFields};

const TABLE: &str = "EDemail";
/// PostgREST returns 406 for a `.object` request when the row is missing.
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Adapter for the singleton record in a Supabase (PostgREST) table. Every
/// call is a fresh round trip; consistency is the datastore's upsert
/// semantics, last writer wins.
#[derive(Clone)]
pub struct RecordStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Serialize)]
struct UpsertRow<'a> {
    id: i64,
    content: &'a str,
    send_time: &'a str,
    to_emails: &'a str,
    cc_emails: &'a str,
    updated_at: DateTime<Utc>,
}

impl RecordStore {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    /// Fetch the singleton record; `Ok(None)` when no row exists yet.
    pub async fn load(&self) -> Result<Option<EmailRecord>, TideError> {
        let resp = self
            .client
            .get(self.table_url())
            .query(&[("id", id_filter())])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(ACCEPT, PGRST_OBJECT)
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_ACCEPTABLE => Ok(None),
            status if status.is_success() => Ok(Some(resp.json().await?)),
            _ => Err(Self::datastore_error(resp).await),
        }
    }

    /// Upsert the editable fields with a fresh `updated_at`.
    pub async fn save(&self, fields: &SaveFields) -> Result<(), TideError> {
        let row = UpsertRow {
            id: RECORD_ID,
            content: &fields.content,
            send_time: &fields.send_time,
            to_emails: &fields.to_emails,
            cc_emails: &fields.cc_emails,
            updated_at: Utc::now(),
        };

        let resp = self
            .client
            .post(self.table_url())
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::datastore_error(resp).await)
        }
    }

    /// Update only `last_sent_at`, after a confirmed successful dispatch.
    pub async fn mark_sent(&self) -> Result<(), TideError> {
        let resp = self
            .client
            .patch(self.table_url())
            .query(&[("id", id_filter())])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&json!({ "last_sent_at": Utc::now() }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::datastore_error(resp).await)
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    async fn datastore_error(resp: reqwest::Response) -> TideError {
        let status = resp.status();
        let message = resp.text().await.unwrap_or_default();
        TideError::Datastore { status, message }
    }
}

fn id_filter() -> String {
    format!("eq.{RECORD_ID}")
}
