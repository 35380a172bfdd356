use crate::error::SantaError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa draw";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// Builds the private note for `gifter`. `labels`, when present, names each gift round.
pub fn compose_message(
    gifter: &str,
    giftees: &[String],
    labels: Option<&[String]>,
) -> Result<Message, SantaError> {
    if let Some(labels) = labels {
        if labels.len() != giftees.len() {
            return Err(SantaError::LabelCountMismatch {
                expected: giftees.len(),
                actual: labels.len(),
            });
        }
    }

    let mut body = format!("Hello {gifter}!\n");
    for (round, giftee) in giftees.iter().enumerate() {
        match labels {
            Some(labels) => body.push_str(&format!(
                "\nGift {} ({}): {giftee}",
                round + 1,
                labels[round]
            )),
            None => body.push_str(&format!("\nGift {}: {giftee}", round + 1)),
        }
    }

    Ok(Message {
        subject: DEFAULT_SUBJECT.to_string(),
        body,
    })
}
