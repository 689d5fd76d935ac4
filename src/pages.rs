//! Inline HTML for the two pages. Presentation glue only: static template
//! chunks interleaved with escaped record values, no template engine.

use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;

use crate::store::EmailRecord;

pub fn login_page(show_error: bool) -> String {
    let banner = if show_error {
        r#"<p style="color:#e74c3c;margin:0 0 12px">Wrong PIN</p>"#
    } else {
        ""
    };
    format!("{LOGIN_PRELUDE}{banner}{LOGIN_FORM}")
}

pub fn editor_page(record: &EmailRecord) -> String {
    let content = escape_html(record.content());
    let send_time = escape_html(record.send_time());
    let to = escape_html(record.to_emails());
    let cc = escape_html(record.cc_emails());
    let last_sent = record
        .last_sent_at
        .map(format_eastern)
        .unwrap_or_else(|| "Never".to_string());
    format!(
        "{EDITOR_PRELUDE}{content}{EDITOR_AFTER_CONTENT}{send_time}{EDITOR_AFTER_TIME}{to}{EDITOR_AFTER_TO}{cc}{EDITOR_AFTER_CC}{last_sent}{EDITOR_TAIL}"
    )
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// "Last sent" display in Eastern time, en-US style (`1/1/2025, 9:00:00 AM`).
fn format_eastern(at: DateTime<Utc>) -> String {
    at.with_timezone(&New_York)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

const LOGIN_PRELUDE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Login</title>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; background: #f0f2f5; }
    .card { background: white; padding: 40px; border-radius: 12px; box-shadow: 0 2px 12px rgba(0,0,0,0.1); text-align: center; width: 300px; }
    h2 { margin: 0 0 20px; color: #1a1a1a; }
    input { width: 100%; padding: 14px; font-size: 24px; text-align: center; border: 2px solid #e0e0e0; border-radius: 8px; box-sizing: border-box; letter-spacing: 8px; }
    input:focus { outline: none; border-color: #4A90D9; }
    button { width: 100%; padding: 14px; font-size: 16px; background: #4A90D9; color: white; border: none; border-radius: 8px; cursor: pointer; margin-top: 16px; font-weight: 600; }
    button:hover { background: #357ABD; }
  </style>
</head>
<body>
  <div class="card">
    <h2>Enter PIN</h2>
    "#;

const LOGIN_FORM: &str = r#"
    <form method="POST" action="/login">
      <input type="password" name="pin" maxlength="6" inputmode="numeric" autofocus required>
      <button type="submit">Enter</button>
    </form>
  </div>
</body>
</html>"#;

const EDITOR_PRELUDE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Email to Ed</title>
  <style>
    * { box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; background: #f0f2f5; }
    .card { background: white; padding: 24px; border-radius: 12px; box-shadow: 0 2px 12px rgba(0,0,0,0.08); }
    .header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
    h1 { margin: 0; color: #1a1a1a; font-size: 22px; }
    .logout { color: #888; font-size: 13px; text-decoration: none; }
    .logout:hover { color: #e74c3c; }
    label { display: block; font-weight: 600; color: #555; margin-bottom: 8px; font-size: 14px; }
    textarea { width: 100%; height: 200px; padding: 12px; border: 2px solid #e0e0e0; border-radius: 8px; font-size: 15px; font-family: inherit; resize: vertical; }
    textarea:focus { outline: none; border-color: #4A90D9; }
    .time-row { display: flex; align-items: center; gap: 12px; margin: 20px 0; }
    .time-row label { margin: 0; }
    input[type="time"] { padding: 10px 14px; font-size: 16px; border: 2px solid #e0e0e0; border-radius: 8px; }
    input[type="time"]:focus { outline: none; border-color: #4A90D9; }
    input[type="text"] { width: 100%; padding: 10px 14px; font-size: 15px; border: 2px solid #e0e0e0; border-radius: 8px; font-family: inherit; }
    input[type="text"]:focus { outline: none; border-color: #4A90D9; }
    .field { margin-bottom: 16px; }
    .btn { display: block; width: 100%; padding: 14px; font-size: 15px; border: none; border-radius: 8px; cursor: pointer; font-weight: 600; margin-top: 12px; }
    .btn-save { background: #4A90D9; color: white; }
    .btn-save:hover { background: #357ABD; }
    .btn-send { background: #28a745; color: white; }
    .btn-send:hover { background: #1e7e34; }
    .status { margin-top: 16px; padding: 12px; border-radius: 8px; text-align: center; font-weight: 500; display: none; }
    .meta { color: #999; font-size: 13px; margin-top: 20px; text-align: center; }
  </style>
</head>
<body>
  <div class="card">
    <div class="header">
      <h1>Email to Ed</h1>
      <a href="/logout" class="logout">Logout</a>
    </div>

    <label for="content">Email Content</label>
    <textarea id="content">"#;

const EDITOR_AFTER_CONTENT: &str = r#"</textarea>

    <div class="time-row">
      <label for="sendTime">Send Time (EST):</label>
      <input type="time" id="sendTime" value=""#;

const EDITOR_AFTER_TIME: &str = r#"">
    </div>

    <div class="field">
      <label for="toEmails">To</label>
      <input type="text" id="toEmails" value=""#;

const EDITOR_AFTER_TO: &str = r#"">
    </div>

    <div class="field">
      <label for="ccEmails">CC</label>
      <input type="text" id="ccEmails" value=""#;

const EDITOR_AFTER_CC: &str = r#"">
    </div>

    <button class="btn btn-save" onclick="save()">Save</button>
    <button class="btn btn-send" onclick="sendNow()">Send Now</button>

    <div id="status" class="status"></div>
    <p class="meta">Last sent: "#;

const EDITOR_TAIL: &str = r#"</p>
  </div>

  <script>
    function showStatus(msg, isError) {
      const el = document.getElementById('status');
      el.textContent = msg;
      el.style.display = 'block';
      el.style.background = isError ? '#f8d7da' : '#d4edda';
      el.style.color = isError ? '#721c24' : '#155724';
      setTimeout(() => { el.style.display = 'none'; }, 4000);
    }

    async function save() {
      try {
        const res = await fetch('/api/save', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({
            content: document.getElementById('content').value,
            send_time: document.getElementById('sendTime').value,
            to_emails: document.getElementById('toEmails').value,
            cc_emails: document.getElementById('ccEmails').value,
          }),
        });
        const data = await res.json();
        showStatus(data.success ? 'Saved!' : data.error, !data.success);
      } catch (e) {
        showStatus('Error: ' + e.message, true);
      }
    }

    async function sendNow() {
      if (!confirm('Send email to Ed now?')) return;
      try {
        showStatus('Sending...', false);
        const res = await fetch('/api/send', { method: 'POST' });
        const data = await res.json();
        showStatus(data.success ? 'Email sent!' : data.error, !data.success);
        if (data.success) setTimeout(() => location.reload(), 2000);
      } catch (e) {
        showStatus('Error: ' + e.message, true);
      }
    }
  </script>
</body>
</html>"#;
