mod interaction;
pub use interaction::{
    ApplicationCommandInteraction, ApplicationCommandInteractionData, Interaction,
    InteractionType, MessageComponentInteraction, MessageComponentInteractionData,
    PingInteraction,
};

mod interaction_response;
pub use interaction_response::{InteractionResponse, InteractionResponseType};

mod callback_data;
pub use callback_data::{CallbackData, EPHEMERAL};

mod component;
pub use component::{ActionRow, Button, ButtonStyle, Component, ComponentType};
