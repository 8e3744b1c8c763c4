use serde::{Deserialize, Serialize};

use crate::user::User;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Member {
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<Box<str>>,
}
