//! Nudge activity-stream payloads.

use serde::Deserialize;

use super::{PayloadDecoder, decode_json};
use crate::error::Result;
use crate::models::Message;

// Keys are matched case-sensitively.
#[derive(Deserialize)]
struct IssuesDevstreamActivityPayload {
    issue: NudgeIssue,
    feedback: NudgeFeedback,
}

#[derive(Deserialize)]
struct NudgeIssue {
    key: String,
}

#[derive(Deserialize)]
struct NudgeFeedback {
    text: String,
}

/// Renders `IssuesDevstreamActivity` as `"<issue key> possibly has <feedback>"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IssuesDevstreamActivityDecoder;

impl PayloadDecoder for IssuesDevstreamActivityDecoder {
    fn event_type(&self) -> &'static str {
        "IssuesDevstreamActivity"
    }

    fn decode(&self, body: &[u8]) -> Result<Message> {
        let data: IssuesDevstreamActivityPayload = decode_json(self.event_type(), body)?;

        Ok(Message::new(format!(
            "{} possibly has {}",
            data.issue.key, data.feedback.text
        )))
    }
}
