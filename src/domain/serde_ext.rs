//! Serde field helpers shared by the stored document types.

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the type's default
///
/// Pair with `#[serde(default)]` so a missing key is accepted too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Tell "key absent" (`None`) apart from "set to null" (`Some(None)`)
///
/// Pair with `#[serde(default)]`; serde only calls this when the key exists.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "double_option")]
        hours: Option<Option<f64>>,
    }

    #[test]
    fn test_null_reads_as_default() {
        let sample: Sample = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn test_absent_null_and_value_differ() {
        let absent: Sample = serde_json::from_str("{}").unwrap();
        let cleared: Sample = serde_json::from_str(r#"{"hours": null}"#).unwrap();
        let set: Sample = serde_json::from_str(r#"{"hours": 2.5}"#).unwrap();

        assert_eq!(absent.hours, None);
        assert_eq!(cleared.hours, Some(None));
        assert_eq!(set.hours, Some(Some(2.5)));
    }
}
