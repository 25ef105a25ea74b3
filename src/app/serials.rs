use crate::utils::error::{Result, WarrantyError};

/// One serial per line; blank lines and `#` comments are skipped.
pub fn parse_serial_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn decode_serial_list(path: &str, data: Vec<u8>) -> Result<Vec<String>> {
    let content = String::from_utf8(data).map_err(|e| WarrantyError::InputError {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(parse_serial_list(&content))
}
