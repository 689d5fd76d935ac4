use chrono::Utc;
use chrono_tz::America::New_York;
use tracing::warn;

use crate::api::{MailerApi, OutboundEmail};
use crate::error::TideError;
use crate::store::RecordStore;

pub const SUBJECT: &str = "Email from Ryan and Brad about your day";
const GREETING: &str = "Hello Ed,";
const LOCATION_TOKEN: &str = "{{location}}";
const LOCATION_VALUE: &str = "on the boat";
/// Full written date, e.g. "Tuesday, January 1, 2025".
const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Composes the outbound message from the stored record and pushes it
/// through the email proxy. Always operator-initiated; the stored send time
/// never triggers anything here.
#[derive(Clone)]
pub struct Dispatcher {
    store: RecordStore,
    mailer: MailerApi,
}

impl Dispatcher {
    pub fn new(store: RecordStore, mailer: MailerApi) -> Self {
        Self { store, mailer }
    }

    pub async fn dispatch(&self) -> Result<(), TideError> {
        let record = match self.store.load().await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(TideError::NoContent),
            Err(e) => {
                warn!(error = %e, "record load failed before dispatch");
                return Err(TideError::NoContent);
            }
        };
        if record.content().is_empty() {
            return Err(TideError::NoContent);
        }

        let text = compose(record.content(), &formatted_today());
        let email = OutboundEmail {
            to: record.to_emails(),
            cc: record.cc_emails(),
            subject: SUBJECT,
            text: &text,
        };
        self.mailer.send(&email).await?;

        // The send already went out; a bookkeeping failure here is logged
        // but not surfaced as a send failure.
        if let Err(e) = self.store.mark_sent().await {
            warn!(error = %e, "failed to record last_sent_at after a successful send");
        }
        Ok(())
    }
}

fn compose(content: &str, today: &str) -> String {
    let substituted = content.replace(LOCATION_TOKEN, LOCATION_VALUE);
    format!("{GREETING}\nToday is {today}\n\n{substituted}")
}

fn formatted_today() -> String {
    Utc::now()
        .with_timezone(&New_York)
        .format(DATE_FORMAT)
        .to_string()
}
