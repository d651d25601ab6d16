//! Device identity and label rules.

use crate::error::CoreError;
use crate::types::DeviceId;

/// Label assigned when a device is first bound without one.
pub const DEFAULT_DEVICE_LABEL: &str = "My Device";

/// Maximum label length in characters.
pub const MAX_LABEL_LENGTH: usize = 50;

/// Length of the canonical hyphenated UUID text form.
const HYPHENATED_UUID_LENGTH: usize = 36;

/// Parse a caller-supplied device id.
///
/// Only the canonical hyphenated form (`8-4-4-4-12` hex digits) is accepted.
pub fn parse_device_id(raw: &str) -> Result<DeviceId, CoreError> {
    if raw.len() != HYPHENATED_UUID_LENGTH {
        return Err(invalid_device_id());
    }
    DeviceId::try_parse(raw).map_err(|_| invalid_device_id())
}

fn invalid_device_id() -> CoreError {
    CoreError::Validation("Invalid device ID".into())
}

/// Normalise an optional label.
///
/// Surrounding whitespace is trimmed; a blank label counts as absent.
pub fn normalize_label(label: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Label must be at most {MAX_LABEL_LENGTH} characters"
        )));
    }
    Ok(Some(label.to_string()))
}
