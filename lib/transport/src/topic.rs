use std::fmt;
use std::str::FromStr;

use serde::de::{value, Error};

#[derive(Debug, PartialEq)]
pub enum Topic {
    State,
    StateRequest,
    ActionRequest,
    ActionResponse(String),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topic::State => write!(f, "state"),
            Topic::StateRequest => write!(f, "state/request"),
            Topic::ActionRequest => write!(f, "action/request"),
            Topic::ActionResponse(action_id) => write!(f, "action/response/{}", action_id),
        }
    }
}

impl FromStr for Topic {
    type Err = value::Error;

    fn from_str(s: &str) -> std::result::Result<Topic, Self::Err> {
        const ERROR_MSG: &str =
            "supported topics are state, state/request, action/request and action/response/<id>";

        match s {
            "state" => Ok(Topic::State),
            "state/request" => Ok(Topic::StateRequest),
            "action/request" => Ok(Topic::ActionRequest),
            _ => match s.strip_prefix("action/response/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Ok(Topic::ActionResponse(id.to_string()))
                }
                _ => Err(value::Error::custom(ERROR_MSG)),
            },
        }
    }
}
