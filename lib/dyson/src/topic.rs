pub fn base_topic(product_type: &str, serial_number: &str) -> String {
    format!("{}/{}", product_type, serial_number)
}

pub fn command_topic(product_type: &str, serial_number: &str) -> String {
    format!("{}/command", base_topic(product_type, serial_number))
}

pub fn status_topic(product_type: &str, serial_number: &str) -> String {
    format!("{}/status/current", base_topic(product_type, serial_number))
}
