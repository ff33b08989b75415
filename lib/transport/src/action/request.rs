use serde::{Deserialize, Serialize};

use crate::elsie;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Request {
    pub actions: Vec<Action>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Elsie(elsie::Action, uuid::Uuid),
}

impl Action {
    pub fn id(&self) -> uuid::Uuid {
        match self {
            Action::Elsie(_, id) => *id,
        }
    }
}
