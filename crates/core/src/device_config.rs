//! Per-user device settings: the bundle, its bounds, and partial patches.
//!
//! [`ConfigBundle::default`] is the single default used both when a user has
//! no stored row yet and as the merge base for the first patch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, FieldViolation};

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive numeric range for an integer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericBound {
    pub min: i64,
    pub max: i64,
}

impl NumericBound {
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Allowed values for an enumerated setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumBound {
    pub options: &'static [&'static str],
}

/// Declared bounds for every constrained setting, returned to clients so they
/// can render input ranges without duplicating constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBounds {
    pub haptic_intensity: NumericBound,
    pub led_brightness: NumericBound,
    pub sensitivity: EnumBound,
}

pub const CONFIG_BOUNDS: ConfigBounds = ConfigBounds {
    haptic_intensity: NumericBound { min: 0, max: 100 },
    led_brightness: NumericBound { min: 0, max: 100 },
    sensitivity: EnumBound {
        options: &["low", "medium", "high"],
    },
};

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Detection sensitivity of the wearable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    Medium,
    High,
}

impl Sensitivity {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// The full settings bundle stored per user.
///
/// Fields missing from a stored document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigBundle {
    pub haptic_intensity: i64,
    pub led_brightness: i64,
    pub sensitivity: Sensitivity,
    pub notifications_enabled: bool,
}

impl Default for ConfigBundle {
    fn default() -> Self {
        Self {
            haptic_intensity: 50,
            led_brightness: 50,
            sensitivity: Sensitivity::Medium,
            notifications_enabled: true,
        }
    }
}

impl ConfigBundle {
    /// Decode a bundle from its stored JSON document.
    pub fn from_stored(data: Value) -> Result<Self, CoreError> {
        serde_json::from_value(data)
            .map_err(|e| CoreError::Internal(format!("Stored config is unreadable: {e}")))
    }

    /// Shallow merge: every field present in `patch` replaces ours.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            haptic_intensity: patch.haptic_intensity.unwrap_or(self.haptic_intensity),
            led_brightness: patch.led_brightness.unwrap_or(self.led_brightness),
            sensitivity: patch.sensitivity.unwrap_or(self.sensitivity),
            notifications_enabled: patch
                .notifications_enabled
                .unwrap_or(self.notifications_enabled),
        }
    }

    /// Encode for the `configs.data` column.
    pub fn to_stored(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub haptic_intensity: Option<i64>,
    pub led_brightness: Option<i64>,
    pub sensitivity: Option<Sensitivity>,
    pub notifications_enabled: Option<bool>,
}

impl ConfigPatch {
    /// Validate a raw JSON body into a patch.
    ///
    /// Every supplied field is checked; if any is out of bounds, of the wrong
    /// type, or unknown, the whole patch is rejected and all offending fields
    /// are listed.
    pub fn from_json(body: &Value) -> Result<Self, CoreError> {
        let Value::Object(fields) = body else {
            return Err(CoreError::Validation(
                "Config patch must be a JSON object".into(),
            ));
        };
        Self::from_fields(fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, CoreError> {
        let mut patch = Self::default();
        let mut violations = Vec::new();

        for (key, value) in fields {
            match key.as_str() {
                "hapticIntensity" => {
                    match bounded_integer(value, CONFIG_BOUNDS.haptic_intensity) {
                        Ok(v) => patch.haptic_intensity = Some(v),
                        Err(msg) => violations.push(FieldViolation::new(key, msg)),
                    }
                }
                "ledBrightness" => match bounded_integer(value, CONFIG_BOUNDS.led_brightness) {
                    Ok(v) => patch.led_brightness = Some(v),
                    Err(msg) => violations.push(FieldViolation::new(key, msg)),
                },
                "sensitivity" => match value.as_str().and_then(Sensitivity::parse) {
                    Some(s) => patch.sensitivity = Some(s),
                    None => violations.push(FieldViolation::new(
                        key,
                        format!(
                            "must be one of {}",
                            CONFIG_BOUNDS.sensitivity.options.join(", ")
                        ),
                    )),
                },
                "notificationsEnabled" => match value.as_bool() {
                    Some(b) => patch.notifications_enabled = Some(b),
                    None => violations.push(FieldViolation::new(key, "must be a boolean")),
                },
                _ => violations.push(FieldViolation::new(key, "unknown setting")),
            }
        }

        if violations.is_empty() {
            Ok(patch)
        } else {
            violations.sort_by(|a, b| a.field.cmp(&b.field));
            Err(CoreError::InvalidFields(violations))
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn bounded_integer(value: &Value, bound: NumericBound) -> Result<i64, String> {
    let range = format!("must be an integer between {} and {}", bound.min, bound.max);
    match value.as_i64() {
        Some(v) if bound.contains(v) => Ok(v),
        _ => Err(range),
    }
}
