use base64::prelude::*;
use sha2::{Digest, Sha512};

/// Base64 of the SHA-512 digest, the form devices expect as an MQTT password.
pub fn sha512_base64(data: &[u8]) -> String {
    BASE64_STANDARD.encode(Sha512::digest(data))
}
