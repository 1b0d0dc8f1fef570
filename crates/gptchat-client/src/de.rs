use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value
///
/// Paired with `#[serde(default)]` so a missing field decodes the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
