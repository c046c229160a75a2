use super::status::{status_of, Outcome, OutcomeStatus, OK_MESSAGE};
use serde::Serialize;

/// The `{status, message, data}` body callers receive for every operation.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: OutcomeStatus,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn from_outcome(outcome: Outcome<T>) -> Self {
        let status = status_of(&outcome);
        match outcome {
            Ok(data) => Self {
                status,
                message: OK_MESSAGE.to_string(),
                data: Some(data),
            },
            Err(e) => Self {
                status,
                message: e.to_string(),
                data: None,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }
}
