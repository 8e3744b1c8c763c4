use model::interaction::{
    ActionRow, Button, ButtonStyle, CallbackData, Component, ComponentType, Interaction,
    InteractionResponse, EPHEMERAL,
};
use model::user::User;

/// The one command answered locally, with the option menu. Every other
/// command is delegated to the forwarding target.
pub const MENU_COMMAND: &str = "menu";

const UNRECOGNIZED_OPTION_REPLY: &str =
    "Sorry, I don't recognise that option. Please pick one from the menu.";

/// Closed set of component ids the relay answers itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    LessonQuestion,
    TaskConsult,
    CareerConsult,
}

impl ComponentAction {
    pub const ALL: [ComponentAction; 3] = [
        ComponentAction::LessonQuestion,
        ComponentAction::TaskConsult,
        ComponentAction::CareerConsult,
    ];

    pub fn from_custom_id(custom_id: &str) -> Option<ComponentAction> {
        Some(match custom_id {
            "lesson_question" => ComponentAction::LessonQuestion,
            "task_consult" => ComponentAction::TaskConsult,
            "career_consult" => ComponentAction::CareerConsult,
            _ => return None,
        })
    }

    pub fn custom_id(&self) -> &'static str {
        match self {
            ComponentAction::LessonQuestion => "lesson_question",
            ComponentAction::TaskConsult => "task_consult",
            ComponentAction::CareerConsult => "career_consult",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentAction::LessonQuestion => "Ask about a lesson",
            ComponentAction::TaskConsult => "Get help with a task",
            ComponentAction::CareerConsult => "Career consultation",
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            ComponentAction::LessonQuestion => {
                "Got it! Please post your lesson question and a tutor will get back to you."
            }
            ComponentAction::TaskConsult => {
                "Got it! Describe the task you are stuck on and we will take a look."
            }
            ComponentAction::CareerConsult => {
                "Got it! Tell us a little about your goals and a mentor will reach out."
            }
        }
    }
}

/// Builds the response for locally-handled interaction kinds. `None` means
/// the interaction should be forwarded instead.
pub fn synthesize(interaction: &Interaction) -> Option<InteractionResponse> {
    match interaction {
        Interaction::Ping(_) => Some(InteractionResponse::new_pong()),
        Interaction::MessageComponent(component) => {
            Some(component_reply(&component.data.custom_id))
        }
        Interaction::ApplicationCommand(command) if command.data.name.as_ref() == MENU_COMMAND => {
            Some(menu_reply(command.invoking_user()))
        }
        _ => None,
    }
}

fn component_reply(custom_id: &str) -> InteractionResponse {
    let content = match ComponentAction::from_custom_id(custom_id) {
        Some(action) => action.reply(),
        None => UNRECOGNIZED_OPTION_REPLY,
    };

    InteractionResponse::new_channel_message_with_source(CallbackData {
        tts: None,
        content: Box::from(content),
        components: None,
        flags: EPHEMERAL,
    })
}

fn menu_reply(user: Option<&User>) -> InteractionResponse {
    let content = match user {
        Some(user) => format!("Hi {}! How can we help today? Pick an option below.", user.display_name()),
        None => "Hi! How can we help today? Pick an option below.".to_owned(),
    };

    let buttons = ComponentAction::ALL
        .iter()
        .map(|action| {
            Component::Button(Button {
                r#type: ComponentType::Button,
                label: Some(Box::from(action.label())),
                custom_id: Some(Box::from(action.custom_id())),
                style: ButtonStyle::Primary,
                disabled: false,
            })
        })
        .collect();

    InteractionResponse::new_channel_message_with_source(CallbackData {
        tts: None,
        content: content.into_boxed_str(),
        components: Some(vec![Component::ActionRow(ActionRow::new(buttons))]),
        flags: 0,
    })
}
