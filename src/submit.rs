use std::sync::mpsc;
use std::thread;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::model::AnswerSet;

/// Body of the server's reply to a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub score: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u32>,
}

impl SubmitResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}

/// A non-string `status` is treated the same as a missing one.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server answered with a JSON object.
    Success(SubmitResponse),
    /// The request never completed, or the reply was not JSON.
    Failure(String),
}

/// Reads a reply body the way the quiz page did: a body that is not JSON,
/// or JSON `null`, counts as a failed request. Other non-object JSON has
/// no status.
pub fn interpret_body(body: &str) -> SubmitOutcome {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) if value.is_object() => match serde_json::from_value(value) {
            Ok(response) => SubmitOutcome::Success(response),
            Err(e) => SubmitOutcome::Failure(format!("Unreadable reply: {}", e)),
        },
        Ok(serde_json::Value::Null) => SubmitOutcome::Failure("Reply is null".to_string()),
        Ok(_) => SubmitOutcome::Success(SubmitResponse::default()),
        Err(e) => SubmitOutcome::Failure(format!("Reply is not JSON: {}", e)),
    }
}

/// Posts answers to the quiz page URL, keeping the session cookie between
/// sign-in and submission.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str) -> Result<Self, String> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| format!("Invalid quiz URL {}: {}", endpoint, e))?;
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| format!("Cannot create HTTP client: {}", e))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Open a named session by posting the welcome form.
    pub fn sign_in(&self, name: &str) -> Result<(), String> {
        let url = self
            .endpoint
            .join("/welcome")
            .map_err(|e| format!("Cannot build sign-in URL: {}", e))?;

        log::info!("signing in as {:?} at {}", name, url);
        let response = self
            .client
            .post(url.clone())
            .form(&[("username", name)])
            .send()
            .map_err(|e| format!("Cannot reach {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("Sign-in failed with HTTP {}", response.status()));
        }
        Ok(())
    }

    pub fn submit(&self, answers: &AnswerSet) -> SubmitOutcome {
        log::debug!("POST {} with {} answers", self.endpoint, answers.len());

        let response = match self.client.post(self.endpoint.clone()).json(answers).send() {
            Ok(response) => response,
            Err(err) => return SubmitOutcome::Failure(format!("Request failed: {}", err)),
        };

        let status = response.status();
        match response.text() {
            Ok(body) => {
                log::debug!("reply HTTP {}: {}", status, body.trim());
                interpret_body(&body)
            }
            Err(err) => SubmitOutcome::Failure(format!("Cannot read reply: {}", err)),
        }
    }
}

/// Submit on a background thread; the outcome is sent on `tx`.
pub fn spawn_submit(
    submitter: HttpSubmitter,
    answers: AnswerSet,
    tx: mpsc::Sender<SubmitOutcome>,
) {
    thread::spawn(move || {
        let outcome = submitter.submit(&answers);
        let _ = tx.send(outcome);
    });
}
