//! GitHub repository hook payloads.

use serde::Deserialize;

use super::{PayloadDecoder, decode_json};
use crate::error::Result;
use crate::models::Message;

// Field names match exactly, case included. GitHub only sends lower-case keys.
#[derive(Deserialize)]
struct IssuesPayload {
    action: String,
    issue: GitHubIssue,
    repository: GitHubRepository,
}

#[derive(Deserialize)]
struct GitHubIssue {
    user: GitHubUser,
}

#[derive(Deserialize)]
struct GitHubUser {
    login: String,
}

#[derive(Deserialize)]
struct GitHubRepository {
    name: String,
}

/// Renders `issues` events as `"<login> has <action> an issue for <repo>."`.
///
/// The actor is the issue author (`issue.user.login`).
#[derive(Debug, Default, Clone, Copy)]
pub struct IssuesDecoder;

impl PayloadDecoder for IssuesDecoder {
    fn event_type(&self) -> &'static str {
        "issues"
    }

    fn decode(&self, body: &[u8]) -> Result<Message> {
        let data: IssuesPayload = decode_json(self.event_type(), body)?;

        Ok(Message::new(format!(
            "{} has {} an issue for {}.",
            data.issue.user.login, data.action, data.repository.name
        )))
    }
}
