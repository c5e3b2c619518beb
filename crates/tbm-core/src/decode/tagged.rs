use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{DecodeError, VariantDecoder};

/// Discriminator -> decoder table for one tagged union.
///
/// Built once per union (see [`tagged_union!`]) and only read afterwards.
pub struct TaggedTable<T> {
    union: &'static str,
    field: &'static str,
    variants: HashMap<&'static str, VariantDecoder<T>>,
}

impl<T> TaggedTable<T> {
    /// Panics if two entries share a discriminator; tables are static, so this
    /// fires on first use in any test touching the union.
    pub fn new(
        union: &'static str,
        field: &'static str,
        entries: &[(&'static str, VariantDecoder<T>)],
    ) -> Self {
        let mut variants = HashMap::with_capacity(entries.len());
        for (tag, decoder) in entries {
            let prev = variants.insert(*tag, *decoder);
            assert!(prev.is_none(), "{union}: duplicate discriminator `{tag}`");
        }
        Self {
            union,
            field,
            variants,
        }
    }

    pub fn union(&self) -> &'static str {
        self.union
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Known discriminators, sorted (for auditing against the protocol docs).
    pub fn discriminators(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.variants.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn decode(&self, raw: Value) -> Result<T, DecodeError> {
        let decoder = {
            let obj = raw
                .as_object()
                .ok_or_else(|| DecodeError::not_an_object(self.union, &raw))?;
            let Some(Value::String(tag)) = obj.get(self.field) else {
                return Err(DecodeError::MissingDiscriminator {
                    union: self.union,
                    field: self.field,
                });
            };
            match self.variants.get(tag.as_str()) {
                Some(decoder) => *decoder,
                None => {
                    tracing::debug!(union = self.union, discriminator = %tag, "unrecognized variant");
                    return Err(DecodeError::UnrecognizedVariant {
                        union: self.union,
                        discriminator: tag.clone(),
                    });
                }
            }
        };
        decoder(raw)
    }

    /// Serialize a variant payload and stamp the discriminator onto it.
    ///
    /// `payload` must serialize to an object; `None` is used by variants that
    /// carry nothing but the tag.
    pub fn encode<P: Serialize + ?Sized>(
        &self,
        tag: &'static str,
        payload: Option<&P>,
    ) -> Result<Value, serde_json::Error> {
        let mut obj = match payload.map(serde_json::to_value).transpose()? {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                    "{} `{tag}` payload must serialize to an object, got {}",
                    self.union,
                    super::json_kind(&other)
                )))
            }
            None => Map::new(),
        };
        obj.insert(self.field.to_string(), Value::String(tag.to_string()));
        Ok(Value::Object(obj))
    }
}

/// Declare a union discriminated by a string field.
///
/// ```ignore
/// tagged_union! {
///     pub enum ReactionType in "type" {
///         "emoji" => Emoji(ReactionEmoji),
///         "paid" => Paid,
///     }
/// }
/// ```
///
/// Payload types are plain serde records that do *not* contain the
/// discriminator field; variants without a payload are written bare.
macro_rules! tagged_union {
    (@decoder $name:ident $variant:ident) => {
        (|_raw: serde_json::Value| Ok::<_, $crate::decode::DecodeError>($name::$variant))
            as $crate::decode::VariantDecoder<$name>
    };
    (@decoder $name:ident $variant:ident $payload:ty) => {
        (|raw: serde_json::Value| {
            $crate::decode::decode_record::<$payload>(stringify!($variant), raw).map($name::$variant)
        }) as $crate::decode::VariantDecoder<$name>
    };
    (@bind $name:ident $variant:ident $p:ident) => {
        $name::$variant
    };
    (@bind $name:ident $variant:ident $p:ident $payload:ty) => {
        $name::$variant($p)
    };
    (@encode $tag:literal $p:ident) => {
        Self::table().encode::<()>($tag, None)
    };
    (@encode $tag:literal $p:ident $payload:ty) => {
        Self::table().encode($tag, Some($p))
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident in $field:literal {
            $(
                $(#[$vmeta:meta])*
                $tag:literal => $variant:ident $(($payload:ty))?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant $(($payload))?,
            )+
        }

        impl $name {
            /// Wire name of the discriminator field.
            pub const DISCRIMINATOR: &'static str = $field;

            pub fn table() -> &'static $crate::decode::TaggedTable<$name> {
                static TABLE: std::sync::LazyLock<$crate::decode::TaggedTable<$name>> =
                    std::sync::LazyLock::new(|| {
                        $crate::decode::TaggedTable::new(
                            stringify!($name),
                            $field,
                            &[$(
                                ($tag, $crate::decode::tagged_union!(@decoder $name $variant $($payload)?)),
                            )+],
                        )
                    });
                &TABLE
            }

            /// Discriminator value this variant is written with.
            pub fn discriminator(&self) -> &'static str {
                match self {
                    $( $name::$variant { .. } => $tag, )+
                }
            }

            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( $name::$variant { .. } => stringify!($variant), )+
                }
            }
        }

        impl $crate::decode::FromWire for $name {
            fn from_wire(raw: serde_json::Value) -> Result<Self, $crate::decode::DecodeError> {
                Self::table().decode(raw)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let value = match self {
                    $(
                        $crate::decode::tagged_union!(@bind $name $variant payload $($payload)?) =>
                            $crate::decode::tagged_union!(@encode $tag payload $($payload)?),
                    )+
                };
                let value = value.map_err(<S::Error as serde::ser::Error>::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::decode::FromWire>::from_wire(raw).map_err($crate::decode::nested_error)
            }
        }
    };
}
pub(crate) use tagged_union;

/// Decode each fixture, re-encode it, decode it again, and check the fixtures
/// cover every discriminator `table` knows.
#[cfg(test)]
pub(crate) fn assert_round_trips<T>(table: &TaggedTable<T>, fixtures: Vec<Value>)
where
    T: super::FromWire + Serialize + PartialEq + std::fmt::Debug,
{
    let mut seen = Vec::new();
    for raw in fixtures {
        let value = T::from_wire(raw.clone()).unwrap_or_else(|e| panic!("{raw}: {e}"));
        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(encoded[table.field()], raw[table.field()], "{raw}");
        assert_eq!(T::from_wire(encoded).unwrap(), value, "{raw}");
        seen.push(raw[table.field()].as_str().unwrap_or_default().to_string());
    }
    seen.sort_unstable();
    assert_eq!(seen, table.discriminators(), "{} fixtures", table.union());
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::decode::{tagged_union, FromWire};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Ping {
        seq: u32,
    }

    tagged_union! {
        pub enum Signal in "kind" {
            "ping" => Ping(Ping),
            "quit" => Quit,
        }
    }

    fn quit(_: Value) -> Result<Signal, DecodeError> {
        Ok(Signal::Quit)
    }

    #[test]
    fn dispatches_on_the_tag_and_restamps_it() {
        let raw = json!({"kind": "ping", "seq": 3});
        let ping = Signal::from_wire(raw.clone()).unwrap();
        assert_eq!(ping, Signal::Ping(Ping { seq: 3 }));
        assert_eq!(serde_json::to_value(&ping).unwrap(), raw);

        assert_eq!(Signal::from_wire(json!({"kind": "quit", "extra": 1})).unwrap(), Signal::Quit);
        assert_eq!(serde_json::to_value(Signal::Quit).unwrap(), json!({"kind": "quit"}));
        assert_eq!(Signal::table().discriminators(), vec!["ping", "quit"]);
    }

    #[test]
    fn shape_errors_are_typed() {
        assert_eq!(
            Signal::from_wire(json!([1])).unwrap_err(),
            DecodeError::NotAnObject { union: "Signal", found: "array" }
        );
        assert_eq!(
            Signal::from_wire(json!({"kind": 5})).unwrap_err(),
            DecodeError::MissingDiscriminator { union: "Signal", field: "kind" }
        );
        assert_eq!(
            Signal::from_wire(json!({"kind": "pong"})).unwrap_err(),
            DecodeError::UnrecognizedVariant {
                union: "Signal",
                discriminator: "pong".to_string(),
            }
        );
    }

    #[test]
    fn encode_rejects_non_object_payloads() {
        let err = Signal::table().encode("ping", Some(&5)).unwrap_err();
        assert!(err.to_string().contains("must serialize to an object"), "{err}");
    }

    #[test]
    #[should_panic(expected = "duplicate discriminator `quit`")]
    fn duplicate_tags_are_rejected() {
        let decoder: VariantDecoder<Signal> = quit;
        TaggedTable::new("Signal", "kind", &[("quit", decoder), ("quit", decoder)]);
    }

    #[test]
    fn round_trip_helper_covers_the_table() {
        assert_round_trips(
            Signal::table(),
            vec![json!({"kind": "quit"}), json!({"kind": "ping", "seq": 1})],
        );
    }
}
