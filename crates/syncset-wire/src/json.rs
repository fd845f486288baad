//! Serde adapter: carry any serializable type as a set item.

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::item::WireItem;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Wraps a serde type so it can be replicated without a hand-written codec.
///
/// The value travels as a length-prefixed JSON document. Equality and
/// hashing are those of the inner value, so two `Json<T>` are the same set
/// member exactly when their inner values are.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}

impl<T: Serialize + DeserializeOwned> WireItem for Json<T> {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        let bytes = serde_json::to_vec(&self.0)?;
        writer.write_bytes(&bytes);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let bytes = reader.read_bytes()?;
        Ok(Json(serde_json::from_slice(bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;
    use std::collections::BTreeMap;

    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct PlayerRef {
        name: String,
        slot: u8,
    }

    #[test]
    fn test_json_roundtrip() {
        let value = Json(PlayerRef {
            name: "host".to_string(),
            slot: 3,
        });

        let mut writer = ByteWriter::new();
        value.encode(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let decoded = Json::<PlayerRef>::decode(&mut reader).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(decoded.name, "host");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_json_type_mismatch() {
        let mut writer = ByteWriter::new();
        Json("not a player".to_string())
            .encode(&mut writer)
            .unwrap();
        let bytes = writer.into_bytes();

        let result = Json::<PlayerRef>::decode(&mut ByteReader::new(&bytes));
        assert!(matches!(result, Err(WireError::Item(_))));
    }

    #[test]
    fn test_unrepresentable_value_fails_to_encode() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);

        let mut writer = ByteWriter::new();
        let result = Json(Some(map)).encode(&mut writer);
        assert!(matches!(result, Err(WireError::Item(_))));
        assert!(writer.is_empty());
    }
}
