use serde::{Deserialize, Serialize};
use str_derive::Str;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SetFanMode(FanMode),
    SetFanState(bool),
    SetFanSpeed(FanSpeed),
    SetNightMode(bool),
    SetOscillation(bool),
    SetFocus(bool),
    SetAutoMode(bool),
    SetStandbyMonitoring(bool),
    SetQualityTarget(QualityTarget),
    SetHeating(bool),
    SetHeatTarget(i32, TemperatureUnit),
    ResetFilter,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Status(Status),
    Sensors(Sensors),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Status {
    pub name: String,
    pub fan_mode: Option<FanMode>,
    pub fan_speed: Option<FanSpeed>,
    pub fan_state: Option<bool>,
    pub night_mode: Option<bool>,
    pub night_mode_speed: Option<FanSpeed>,
    pub oscillation: Option<bool>,
    pub oscillation_angles: Option<(u16, u16)>,
    pub focus: Option<bool>,
    pub auto_mode: Option<bool>,
    pub standby_monitoring: Option<bool>,
    pub quality_target: Option<QualityTarget>,
    pub heating: Option<bool>,
    pub heat_target: Option<f32>,
    pub filter_life: Option<u16>,
    pub error_code: Option<String>,
    pub filter_warning: bool,
    pub temperature_unit: TemperatureUnit,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Sensors {
    pub name: String,
    pub temperature: Option<f32>,
    pub humidity: Option<u8>,
    pub volatile_compounds: Option<u16>,
    pub particles: Option<u16>,
    pub pm25: Option<u16>,
    pub pm10: Option<u16>,
    pub nitrogen_dioxide: Option<u16>,
    pub sleep_timer: Option<u16>,
    pub temperature_unit: TemperatureUnit,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Str, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanMode {
    Off,
    On,
    Auto,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    Level(u8),
    Auto,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Str, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QualityTarget {
    Normal,
    Medium,
    High,
}

impl QualityTarget {
    /// Sensitivity level understood by the appliance.
    pub fn level(self) -> u8 {
        match self {
            QualityTarget::Normal => 10,
            QualityTarget::Medium => 20,
            QualityTarget::High => 30,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, Str, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}
