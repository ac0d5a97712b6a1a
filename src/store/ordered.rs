//! Deserializes a JSON object into entries kept in document order.
//!
//! Ranking ties are broken by source order, so reference tables must not go
//! through a hash map on their way in. `null` deserializes as no entries.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
  D: Deserializer<'de>,
  V: Deserialize<'de>,
{
  struct OrderedVisitor<V>(PhantomData<V>);

  impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
      f.write_str("a map or null")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
      Ok(Vec::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
      Ok(Vec::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
      let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
      while let Some((key, value)) = map.next_entry::<String, V>()? {
        entries.push((key, value));
      }
      Ok(entries)
    }
  }

  deserializer.deserialize_any(OrderedVisitor(PhantomData))
}
