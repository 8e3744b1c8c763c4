use crate::interaction::Component;
use serde::{Deserialize, Serialize};

/// Message flag marking a response as visible only to the invoking user.
pub const EPHEMERAL: u32 = 64;

#[derive(Serialize, Deserialize, Debug)]
pub struct CallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(default)]
    pub content: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default)]
    pub flags: u32,
}
