use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

const REQUEST_CURRENT_STATE: &str = "REQUEST-CURRENT-STATE";
const STATE_SET: &str = "STATE-SET";
const MODE_REASON: &str = "LAPP";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    CurrentState,
    StateChange,
    EnvironmentalSensorData,
    Unknown,
}

impl MessageKind {
    pub fn from_msg(msg: &str) -> Self {
        match msg {
            "CURRENT-STATE" => Self::CurrentState,
            "STATE-CHANGE" => Self::StateChange,
            "ENVIRONMENTAL-CURRENT-SENSOR-DATA" => Self::EnvironmentalSensorData,
            _ => Self::Unknown,
        }
    }
}

/// Inbound telegram as published by the device on its status topic.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Telegram {
    pub msg: String,
    #[serde(default, rename = "product-state")]
    pub product_state: Option<Map<String, Value>>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub time: Option<String>,
}

impl Telegram {
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::from_msg(&self.msg)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundTelegram {
    pub msg: &'static str,
    #[serde(rename = "mode-reason", skip_serializing_if = "Option::is_none")]
    pub mode_reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    pub time: String,
}

impl OutboundTelegram {
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

pub fn build_state_request(now: DateTime<Utc>) -> OutboundTelegram {
    OutboundTelegram {
        msg: REQUEST_CURRENT_STATE,
        mode_reason: None,
        data: None,
        time: now.format(TIME_FORMAT).to_string(),
    }
}

pub fn build_state_change(key: &str, value: String, now: DateTime<Utc>) -> OutboundTelegram {
    let mut data = Map::new();
    data.insert(key.to_string(), Value::String(value));

    OutboundTelegram {
        msg: STATE_SET,
        mode_reason: Some(MODE_REASON),
        data: Some(data),
        time: now.format(TIME_FORMAT).to_string(),
    }
}
