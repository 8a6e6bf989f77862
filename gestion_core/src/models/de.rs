//! Désérialiseurs tolérants : le backend renvoie parfois les nombres en texte.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Oid;

fn as_oid(value: &Value) -> Option<Oid> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn lenient_oid<'de, D: Deserializer<'de>>(d: D) -> Result<Oid, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(as_oid)
        .unwrap_or_default())
}

pub fn lenient_opt_oid<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Oid>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(as_oid))
}

pub fn lenient_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn lenient_opt_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(as_oid)
        .and_then(|n| i32::try_from(n).ok()))
}

/// Texte ou nombre, restitué en texte ; utile pour director / viceDirector.
pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
