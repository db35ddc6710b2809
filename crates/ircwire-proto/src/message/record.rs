//! Serde representation: `{origin, target, command, arguments}`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::Message;
use crate::command::Command;

#[derive(Serialize, Deserialize)]
struct MessageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    command: String,
    #[serde(default)]
    arguments: Vec<String>,
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MessageRecord {
            origin: self.origin.clone(),
            target: self.target.clone(),
            command: self.command.name(),
            arguments: self.command.arguments(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = MessageRecord::deserialize(deserializer)?;
        let command = Command::from_text(&record.command, &record.arguments).map_err(D::Error::custom)?;
        Ok(Message {
            origin: record.origin,
            target: record.target,
            command,
        })
    }
}
