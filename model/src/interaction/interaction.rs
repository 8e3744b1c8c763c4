use crate::guild::Member;
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Debug)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Interaction {
    Ping(Box<PingInteraction>),
    ApplicationCommand(Box<ApplicationCommandInteraction>),
    MessageComponent(Box<MessageComponentInteraction>),
    /// Any other interaction type. The raw request body is what gets
    /// forwarded downstream, so no fields are retained here.
    Unhandled,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            _ => return Err(format!("unhandled interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PingInteraction {
    pub r#type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandInteraction {
    pub r#type: InteractionType,
    pub data: ApplicationCommandInteractionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl ApplicationCommandInteraction {
    /// The guild-member user takes precedence over the direct-message user
    /// when both are present.
    pub fn invoking_user(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandInteractionData {
    pub name: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteraction {
    pub r#type: InteractionType,
    pub data: MessageComponentInteractionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let raw_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| D::Error::custom("interaction type was not an integer"))?;

        let interaction = match InteractionType::try_from(raw_type) {
            Ok(InteractionType::Ping) => serde_json::from_value(value).map(Interaction::Ping),
            Ok(InteractionType::ApplicationCommand) => {
                serde_json::from_value(value).map(Interaction::ApplicationCommand)
            }
            Ok(InteractionType::MessageComponent) => {
                serde_json::from_value(value).map(Interaction::MessageComponent)
            }
            Err(_) => Ok(Interaction::Unhandled),
        }
        .map_err(D::Error::custom)?;

        Ok(interaction)
    }
}
