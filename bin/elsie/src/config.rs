use std::time::Duration;

use dyson::{CloudLogin, CredentialSources, LocalCredentials, SchedulerConfig};
use transport::elsie::TemperatureUnit;

use crate::{Error, Result};

const DEFAULT_HEARTBEAT_SECS: u64 = 10;
const DEFAULT_REQUEST_INTERVAL: u32 = 3;

#[derive(Debug)]
pub struct Config {
    pub mqtt_address: String,
    pub mqtt_user: String,
    pub mqtt_pass: String,
    pub device_address: String,
    pub credentials: CredentialSources,
    pub heartbeat: Duration,
    pub scheduler: SchedulerConfig,
    pub temperature_unit: TemperatureUnit,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let required = |name: &'static str| lookup(name).ok_or(Error::MissingVariable(name));

        let local = match lookup("DEVICE_SERIAL") {
            Some(serial_number) => Some(LocalCredentials {
                serial_number,
                product_type: required("DEVICE_PRODUCT_TYPE")?,
                password: required("DEVICE_PASSWORD")?,
            }),
            None => None,
        };

        let cloud = match lookup("CLOUD_EMAIL") {
            Some(email) => Some(CloudLogin {
                email,
                password: required("CLOUD_PASSWORD")?,
                country: lookup("CLOUD_COUNTRY").unwrap_or_else(|| "US".to_string()),
            }),
            None => None,
        };

        let heartbeat = match lookup("HEARTBEAT_SECS") {
            Some(secs) => secs
                .parse()
                .map_err(|_| Error::InvalidVariable("HEARTBEAT_SECS", secs))?,
            None => DEFAULT_HEARTBEAT_SECS,
        };

        let request_interval = match lookup("REQUEST_INTERVAL") {
            Some(interval) => match interval.parse::<u32>() {
                Ok(value) if value >= 1 => value,
                _ => return Err(Error::InvalidVariable("REQUEST_INTERVAL", interval)),
            },
            None => DEFAULT_REQUEST_INTERVAL,
        };

        let temperature_unit = match lookup("TEMPERATURE_UNIT") {
            Some(unit) => unit.parse().map_err(|_| {
                Error::InvalidVariable(
                    "TEMPERATURE_UNIT",
                    format!("{unit}, expected one of {:?}", TemperatureUnit::ALL),
                )
            })?,
            None => TemperatureUnit::Celsius,
        };

        Ok(Config {
            mqtt_address: required("MQTT_ADDRESS")?,
            mqtt_user: required("MQTT_USER")?,
            mqtt_pass: required("MQTT_PASS")?,
            device_address: required("DEVICE_ADDRESS")?,
            credentials: CredentialSources {
                local,
                cloud,
                device_name: lookup("DEVICE_NAME"),
            },
            heartbeat: Duration::from_secs(heartbeat.max(1)),
            scheduler: SchedulerConfig { request_interval },
            temperature_unit,
        })
    }
}
