//! Lenient decoders for backend fields whose JSON type drifts between
//! endpoints (numbers sometimes arrive as strings, sometimes as `null`).

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// `12.5`, `"12.5"` and `null` all decode; anything unparsable becomes `0.0`
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}
