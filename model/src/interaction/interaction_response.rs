use crate::interaction::CallbackData;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum InteractionResponse {
    Pong(SimpleInteractionResponse),
    ChannelMessageWithSource(ChannelMessageResponse),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SimpleInteractionResponse {
    r#type: InteractionResponseType,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChannelMessageResponse {
    r#type: InteractionResponseType,
    pub data: CallbackData,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
}

impl TryFrom<u64> for InteractionResponseType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            _ => {
                return Err(
                    format!("invalid interaction response type \"{}\"", value).into_boxed_str()
                )
            }
        })
    }
}

impl InteractionResponse {
    pub fn new_pong() -> InteractionResponse {
        InteractionResponse::Pong(SimpleInteractionResponse {
            r#type: InteractionResponseType::Pong,
        })
    }

    pub fn new_channel_message_with_source(data: CallbackData) -> InteractionResponse {
        InteractionResponse::ChannelMessageWithSource(ChannelMessageResponse {
            r#type: InteractionResponseType::ChannelMessageWithSource,
            data,
        })
    }
}

impl<'de> Deserialize<'de> for InteractionResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let response_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction response type was not an integer"))
            .and_then(InteractionResponseType::try_from)
            .map_err(D::Error::custom)?;

        let response = match response_type {
            InteractionResponseType::Pong => {
                serde_json::from_value(value).map(InteractionResponse::Pong)
            }
            InteractionResponseType::ChannelMessageWithSource => {
                serde_json::from_value(value).map(InteractionResponse::ChannelMessageWithSource)
            }
        }
        .map_err(D::Error::custom)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::EPHEMERAL;

    #[test]
    fn test_pong_shape() {
        let json = serde_json::to_string(&InteractionResponse::new_pong()).unwrap();
        assert_eq!(json, r#"{"type":1}"#);
    }

    #[test]
    fn test_channel_message_shape() {
        let response = InteractionResponse::new_channel_message_with_source(CallbackData {
            tts: None,
            content: Box::from("hello"),
            components: None,
            flags: EPHEMERAL,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], 4);
        assert_eq!(json["data"]["content"], "hello");
        assert_eq!(json["data"]["flags"], 64);
    }

    #[test]
    fn test_deserialize_channel_message() {
        let response: InteractionResponse =
            serde_json::from_str(r#"{"type":4,"data":{"content":"done"}}"#).unwrap();
        assert!(matches!(
            response,
            InteractionResponse::ChannelMessageWithSource(_)
        ));
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        assert!(serde_json::from_str::<InteractionResponse>(r#"{"type":9,"data":{}}"#).is_err());
        assert!(serde_json::from_str::<InteractionResponse>(r#""pong""#).is_err());
    }
}
