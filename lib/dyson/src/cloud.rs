use base64::prelude::*;
use crypto::Token;
use serde::Deserialize;

use crate::{Error, Result};

const CREDENTIAL_KEY: Token<32> = [
    0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10,
    0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20,
];
const CREDENTIAL_IV: Token<16> = [0; 16];

/// Device record from the cloud account manifest.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudDevice {
    pub serial: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub local_credentials: String,
    #[serde(default)]
    pub auto_update: bool,
    #[serde(default)]
    pub new_version_available: bool,
    pub product_type: String,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Deserialize)]
struct LocalCredentials {
    #[serde(rename = "apPasswordHash")]
    ap_password_hash: String,
}

impl CloudDevice {
    /// Decrypts the local broker password hash issued by the cloud.
    pub fn credential(&self) -> Result<String> {
        let mut data = BASE64_STANDARD
            .decode(&self.local_credentials)
            .map_err(|_| Error::InvalidCloudCredential("not base64"))?;

        let decrypted = crypto::cbc::decrypt(&mut data, CREDENTIAL_KEY, CREDENTIAL_IV)
            .map_err(|_| Error::InvalidCloudCredential("bad padding"))?;

        let credentials: LocalCredentials = serde_json::from_slice(decrypted)
            .map_err(|_| Error::InvalidCloudCredential("missing apPasswordHash"))?;

        Ok(credentials.ap_password_hash)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) const LOCAL_CREDENTIALS: &str = "eQl8cpJlNiZYwjC+7WY7s80+RK8ZYtJ1gBKeDq/puV/Jgj3kum/+cAElZDjc68QWKGjd3PSA5/TEfvtHnHZ1oX00xeusi70HMcDhD7khHXzDZoMPL1fqYGfkkHc/xlXXCq7muAeYXCMiRe1VkaVzVTH7ZVzKzmoSi6YlMOOa2/MMwDENEayq1zZerpj3WwCp";
    pub(crate) const PASSWORD_HASH: &str =
        "kXCSbBfHJxPPnhTvEIiUPJAzXFiCnBSmEcaeTOFyItIikPPXXyqBDkqHXMsYEVBAkqJfVdQxYkIgnYvgJwIZAw==";

    pub(crate) fn device(name: &str) -> CloudDevice {
        serde_json::from_value(json!({
            "Serial": "NN2-EU-JEA3830A",
            "Name": name,
            "Version": "21.03.08",
            "LocalCredentials": LOCAL_CREDENTIALS,
            "AutoUpdate": true,
            "NewVersionAvailable": false,
            "ProductType": "475"
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_manifest_record() {
        let device = device("Bedroom");

        assert_eq!(device.serial, "NN2-EU-JEA3830A");
        assert_eq!(device.name, "Bedroom");
        assert_eq!(device.product_type, "475");
        assert!(device.auto_update);
        assert!(!device.new_version_available);
        assert_eq!(device.active, None);
    }

    #[test]
    fn test_credential() {
        assert_eq!(device("Bedroom").credential().unwrap(), PASSWORD_HASH);
    }

    #[test]
    fn test_invalid_credential() {
        let mut device = device("Bedroom");

        device.local_credentials = "***".to_string();
        assert!(matches!(
            device.credential(),
            Err(Error::InvalidCloudCredential(_))
        ));

        device.local_credentials = BASE64_STANDARD.encode([0u8; 16]);
        assert!(matches!(
            device.credential(),
            Err(Error::InvalidCloudCredential(_))
        ));
    }
}
