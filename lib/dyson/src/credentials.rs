use std::fmt;

use log::{info, warn};

use crate::topic::{base_topic, command_topic, status_topic};
use crate::{CloudDevice, Error, Result};

/// Everything needed to reach one device on its local broker.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    serial_number: String,
    product_type: String,
    credential: String,
    display_name: String,
}

impl DeviceIdentity {
    pub fn new(
        serial_number: impl Into<String>,
        product_type: impl Into<String>,
        credential: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            product_type: product_type.into(),
            credential: credential.into(),
            display_name: display_name.into(),
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn base_topic(&self) -> String {
        base_topic(&self.product_type, &self.serial_number)
    }

    pub fn command_topic(&self) -> String {
        command_topic(&self.product_type, &self.serial_number)
    }

    pub fn status_topic(&self) -> String {
        status_topic(&self.product_type, &self.serial_number)
    }
}

impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceIdentity")
            .field("serial_number", &self.serial_number)
            .field("product_type", &self.product_type)
            .field("credential", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Serial, product type and plain device password as printed on the appliance.
#[derive(Clone)]
pub struct LocalCredentials {
    pub serial_number: String,
    pub product_type: String,
    pub password: String,
}

impl fmt::Debug for LocalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCredentials")
            .field("serial_number", &self.serial_number)
            .field("product_type", &self.product_type)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct CloudLogin {
    pub email: String,
    pub password: String,
    pub country: String,
}

impl fmt::Debug for CloudLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudLogin")
            .field("email", &self.email)
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CredentialSources {
    pub local: Option<LocalCredentials>,
    pub cloud: Option<CloudLogin>,
    pub device_name: Option<String>,
}

/// Picks the device to talk to.
///
/// A configured device name must match one of the cloud devices. Without a name the cloud
/// account has to hold exactly one device. Local credentials are only used when the cloud
/// offered nothing.
pub fn resolve_identity(
    sources: &CredentialSources,
    cloud_devices: &[CloudDevice],
) -> Result<DeviceIdentity> {
    if let Some(name) = &sources.device_name {
        if !cloud_devices.is_empty() {
            let device = cloud_devices
                .iter()
                .find(|device| &device.name == name)
                .ok_or_else(|| {
                    let names = cloud_devices.iter().map(|d| d.name.clone()).collect();
                    Error::DeviceNameNotFound(name.clone(), names)
                })?;

            return identity_from_cloud(device);
        }
    }

    match cloud_devices {
        [device] => return identity_from_cloud(device),
        [] => {}
        devices => return Err(Error::AmbiguousDeviceSelection(devices.len())),
    }

    if let Some(cloud) = &sources.cloud {
        warn!("cloud account {} has no devices", cloud.email);
    }

    let local = sources.local.as_ref().ok_or(Error::NoUsableCredentials)?;
    info!("using local credentials for {}", local.serial_number);

    Ok(DeviceIdentity::new(
        &local.serial_number,
        &local.product_type,
        crypto::sha512_base64(local.password.as_bytes()),
        &local.serial_number,
    ))
}

fn identity_from_cloud(device: &CloudDevice) -> Result<DeviceIdentity> {
    info!("using cloud device {} ({})", device.name, device.serial);

    Ok(DeviceIdentity::new(
        &device.serial,
        &device.product_type,
        device.credential()?,
        &device.name,
    ))
}
