use serde::Deserialize;
use serde::Serialize;
use strum::Display;

/// Who produced a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    #[default]
    User,
    #[serde(rename = "assistant")]
    Agent,
    System,
}
