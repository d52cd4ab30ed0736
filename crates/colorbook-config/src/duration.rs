use std::time::Duration;

use serde::{Deserialize, Deserializer, de};

/// Deserialize a human-readable duration such as `"1s"` or `"5m"`
pub(crate) fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| de::Error::custom(format!("invalid duration '{raw}': {e}")))
}

/// Optional variant of [`deserialize_duration`]
pub(crate) fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|raw| duration_str::parse(&raw).map_err(|e| de::Error::custom(format!("invalid duration '{raw}': {e}"))))
        .transpose()
}
