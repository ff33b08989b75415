use serde_json::{Map, Value};

use super::{Fields, Fold};
use crate::value::kelvin_tenths_to_celsius;
use crate::{Error, ErrorStatus, FanSpeed, HeatMode, QualityTarget, Result};
use crate::{TriStateSwitch, WarningStatus};

/// Wire keys feeding the fan mode, highest precedence first.
const FAN_MODE_KEYS: [&str; 2] = ["fmod", "fpwr"];

#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    pub fan_mode: Option<TriStateSwitch>,
    pub fan_mode_auto: Option<TriStateSwitch>,
    pub fan_state: Option<TriStateSwitch>,
    pub night_mode: Option<TriStateSwitch>,
    pub oscillation: Option<TriStateSwitch>,
    pub oscillation_status: Option<TriStateSwitch>,
    pub fan_speed: Option<FanSpeed>,
    pub focus: Option<TriStateSwitch>,
    pub filter_life_percent: Option<u16>,
    pub quality_target: Option<QualityTarget>,
    pub standby_monitoring: Option<TriStateSwitch>,
    pub heat_mode: Option<HeatMode>,
    pub heat_state: Option<HeatMode>,
    pub heat_target_celsius: Option<f64>,
    pub oscillation_angle_low: Option<u16>,
    pub oscillation_angle_high: Option<u16>,
    pub night_mode_speed: Option<FanSpeed>,
    pub error_status: ErrorStatus,
    pub warning_status: WarningStatus,
}

impl StateSnapshot {
    pub fn fold(data: &Map<String, Value>) -> Result<Fold<Self>> {
        let mut fields = Fields::new(data);

        let error_status = fields
            .token("ercd")
            .map(ErrorStatus::from_code)
            .ok_or(Error::MalformedTelegram("missing ercd"))?;
        let warning_status = fields
            .token("wacd")
            .map(WarningStatus::from_code)
            .ok_or(Error::MalformedTelegram("missing wacd"))?;

        let filter_life_percent = match (fields.reading::<u16>("hflr"), fields.reading::<u16>("cflr")) {
            (Some(hepa), Some(carbon)) => Some(((hepa as u32 + carbon as u32) / 2) as u16),
            _ => fields.reading("filf"),
        };

        let snapshot = Self {
            fan_mode: fields.parse_first(&FAN_MODE_KEYS),
            fan_mode_auto: fields.parse("auto"),
            fan_state: fields.parse("fnst"),
            night_mode: fields.parse("nmod"),
            oscillation: fields.parse("oson"),
            oscillation_status: fields.parse("oscs"),
            fan_speed: fields.parse("fnsp"),
            focus: fields.parse("fdir"),
            filter_life_percent,
            quality_target: fields.parse("qtar"),
            standby_monitoring: fields.parse("rhtm"),
            heat_mode: fields.parse("hmod"),
            heat_state: fields.parse("hsta"),
            heat_target_celsius: fields.reading("hmax").map(kelvin_tenths_to_celsius),
            oscillation_angle_low: fields.reading("osal"),
            oscillation_angle_high: fields.reading("osau"),
            night_mode_speed: fields.parse("nmdv"),
            error_status,
            warning_status,
        };

        Ok(fields.into_fold(snapshot))
    }

    /// Whether the telegram carried enough to count as a reply from the device.
    pub fn has_data(&self) -> bool {
        self.fan_speed.is_some() || self.fan_mode.is_some()
    }
}
