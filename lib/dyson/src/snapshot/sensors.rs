use serde_json::{Map, Value};

use super::{Fields, Fold};
use crate::value::kelvin_tenths_to_celsius;

/// Wire keys feeding the volatile compounds index, highest precedence first.
const VOLATILE_COMPOUNDS_KEYS: [&str; 2] = ["va10", "vact"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    pub humidity: Option<u8>,
    pub temperature_celsius: Option<f64>,
    pub volatile_compounds_index: Option<u16>,
    pub particles_index: Option<u16>,
    pub particles_2_5: Option<u16>,
    pub particles_10: Option<u16>,
    pub particulate_matter_25: Option<u16>,
    pub particulate_matter_10: Option<u16>,
    pub nitrogen_dioxide_density: Option<u16>,
    pub sleep_timer_minutes: Option<u16>,
    pub heat_target_celsius: Option<f64>,
}

impl SensorSnapshot {
    pub fn fold(data: &Map<String, Value>) -> Fold<Self> {
        let mut fields = Fields::new(data);

        let snapshot = Self {
            humidity: fields.percent("hact"),
            temperature_celsius: fields.reading("tact").map(kelvin_tenths_to_celsius),
            volatile_compounds_index: fields.reading_first(&VOLATILE_COMPOUNDS_KEYS),
            particles_index: fields.reading("pact"),
            particles_2_5: fields.reading("p25r"),
            particles_10: fields.reading("p10r"),
            particulate_matter_25: fields.reading("pm25"),
            particulate_matter_10: fields.reading("pm10"),
            nitrogen_dioxide_density: fields.reading("noxl"),
            sleep_timer_minutes: fields.reading("sltm"),
            heat_target_celsius: fields.reading("hmax").map(kelvin_tenths_to_celsius),
        };

        fields.into_fold(snapshot)
    }

    pub fn has_data(&self) -> bool {
        self.temperature_celsius.is_some() && self.humidity.is_some()
    }
}
