//! License payload (JSON) and the validated snapshot derived from it.
//!
//! Decoding is lenient: a field with the wrong JSON type keeps its zero value
//! while the remaining fields still decode, and a body that is not a JSON object
//! leaves every field at its default. Keys match case-insensitively when no
//! exact key is present. Only the expiration date is validated.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{ExporterError, Result};

/// Calendar date layout used by `expires_at`.
pub const EXPIRES_AT_FORMAT: &str = "%Y-%m-%d";

const FIELDS: [&str; 6] = [
    "active_users",
    "user_limit",
    "expires_at",
    "maximum_user_count",
    "expired",
    "overage",
];

/// Raw `/api/v4/license` body as far as the exporter cares about it.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LicensePayload {
    #[serde(deserialize_with = "lenient")]
    pub active_users: f64,
    #[serde(deserialize_with = "lenient")]
    pub user_limit: f64,
    /// Expiration date as `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient")]
    pub expires_at: String,
    #[serde(deserialize_with = "lenient")]
    pub maximum_user_count: f64,
    #[serde(deserialize_with = "lenient")]
    pub expired: bool,
    /// Negative when seats are unused.
    #[serde(deserialize_with = "lenient")]
    pub overage: f64,
}

impl LicensePayload {
    /// Decode a response body. Never fails; see the module docs.
    pub fn from_slice(body: &[u8]) -> Self {
        let value = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Value::Object(fold_keys(map)),
            Ok(other) => {
                tracing::debug!(json_type = json_type(&other), "license body is not an object");
                return Self::default();
            }
            Err(e) => {
                tracing::debug!(error = %e, "license body is not valid JSON");
                return Self::default();
            }
        };

        // Field errors are swallowed by `lenient`, so only a non-object can fail here.
        Self::deserialize(value).unwrap_or_default()
    }
}

/// A license payload whose expiration date has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseSnapshot {
    pub active_users: f64,
    pub user_limit: f64,
    pub expires_at: NaiveDate,
    /// `expires_at` at 00:00 UTC, in Unix seconds.
    pub expires_at_secs: f64,
    pub maximum_user_count: f64,
    pub expired: bool,
    pub overage: f64,
}

impl LicenseSnapshot {
    /// 1.0 when the license has expired, 0.0 otherwise.
    pub fn expired_indicator(&self) -> f64 {
        if self.expired {
            1.0
        } else {
            0.0
        }
    }
}

impl TryFrom<LicensePayload> for LicenseSnapshot {
    type Error = ExporterError;

    fn try_from(p: LicensePayload) -> Result<Self> {
        let expires_at = parse_expires_at(&p.expires_at)?;
        let expires_at_secs = expires_at.and_time(NaiveTime::MIN).and_utc().timestamp() as f64;

        Ok(Self {
            active_users: p.active_users,
            user_limit: p.user_limit,
            expires_at,
            expires_at_secs,
            maximum_user_count: p.maximum_user_count,
            expired: p.expired,
            overage: p.overage,
        })
    }
}

/// Decode a response body and validate it into a snapshot.
pub fn parse_license(body: &[u8]) -> Result<LicenseSnapshot> {
    LicenseSnapshot::try_from(LicensePayload::from_slice(body))
}

/// Strict `YYYY-MM-DD`: chrono alone would also accept unpadded fields.
fn parse_expires_at(s: &str) -> Result<NaiveDate> {
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(ExporterError::Decode(format!(
            "expires_at {s:?} is not a YYYY-MM-DD date"
        )));
    }

    NaiveDate::parse_from_str(s, EXPIRES_AT_FORMAT)
        .map_err(|e| ExporterError::Decode(format!("expires_at {s:?}: {e}")))
}

/// Copy `Active_Users`-style keys onto the field name; an exact key wins.
fn fold_keys(mut map: Map<String, Value>) -> Map<String, Value> {
    let folded: Vec<(&'static str, Value)> = map
        .iter()
        .filter(|(k, _)| !FIELDS.contains(&k.as_str()))
        .filter_map(|(k, v)| {
            FIELDS
                .iter()
                .find(|f| f.eq_ignore_ascii_case(k))
                .map(|f| (*f, v.clone()))
        })
        .collect();

    for (field, v) in folded {
        map.entry(field).or_insert(v);
    }
    map
}

fn lenient<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(de)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
