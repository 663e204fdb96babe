#[doc(hidden)]
pub mod __private {
    use serde::{
        de::{Error as _, Expected, IgnoredAny, MapAccess},
        ser::{SerializeMap as _, Serializer},
    };

    pub use ::serde as serde_crate;

    /// Writes `{ key: payload }`.
    pub fn serialize_slot<S, T>(serializer: S, key: &'static str, payload: &T) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: serde::Serialize + ?Sized,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(key, payload)?;
        map.end()
    }

    /// Writes `{}`.
    pub fn serialize_vacant<S>(serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_map(Some(0))?.end()
    }

    /// Fails if `map` has entries left after the one that was already read.
    pub fn end_single_entry<'de, A>(map: &mut A, expected: &dyn Expected) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut len = 1;
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
            len += 1;
        }

        if len == 1 {
            Ok(())
        } else {
            Err(A::Error::invalid_length(len, expected))
        }
    }
}
