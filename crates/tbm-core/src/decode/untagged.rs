use serde::Serialize;
use serde_json::{Map, Value};

use super::{DecodeError, VariantDecoder};

/// How overlapping signature keys are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exclusivity {
    /// At most one signature key may be present; two or more is an
    /// `AmbiguousVariant` failure. Table order carries no meaning.
    Exclusive,
    /// Keys are tested in table order and the first hit wins. Used where one
    /// variant's key set is a superset of another's; the union documents why
    /// its order is safe.
    Priority,
}

/// Where the variant payload lives relative to the signature key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The whole object is the payload (the key is one of its fields).
    Inline,
    /// The payload is the value stored under the key (`{"message": {...}}`).
    Nested,
}

struct Signature<T> {
    key: &'static str,
    variant: &'static str,
    decode: VariantDecoder<T>,
}

/// Signature-key -> decoder table for one untagged union.
pub struct UntaggedTable<T> {
    union: &'static str,
    exclusivity: Exclusivity,
    placement: Placement,
    signatures: Vec<Signature<T>>,
}

impl<T> UntaggedTable<T> {
    pub fn new(
        union: &'static str,
        exclusivity: Exclusivity,
        placement: Placement,
        entries: &[(&'static str, &'static str, VariantDecoder<T>)],
    ) -> Self {
        let mut signatures: Vec<Signature<T>> = Vec::with_capacity(entries.len());
        for (key, variant, decode) in entries {
            assert!(
                signatures.iter().all(|s| s.key != *key),
                "{union}: duplicate signature key `{key}`"
            );
            signatures.push(Signature {
                key: *key,
                variant: *variant,
                decode: *decode,
            });
        }
        Self {
            union,
            exclusivity,
            placement,
            signatures,
        }
    }

    pub fn union(&self) -> &'static str {
        self.union
    }

    /// Signature keys in evaluation order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.signatures.iter().map(|s| s.key).collect()
    }

    /// Which variant the object's key set selects, without decoding it.
    pub fn classify(&self, obj: &Map<String, Value>) -> Result<&'static str, DecodeError> {
        self.select(obj).map(|s| s.variant)
    }

    fn select(&self, obj: &Map<String, Value>) -> Result<&Signature<T>, DecodeError> {
        let mut hits = self.signatures.iter().filter(|s| obj.contains_key(s.key));

        let Some(first) = hits.next() else {
            let mut keys: Vec<String> = obj.keys().cloned().collect();
            keys.sort_unstable();
            return Err(DecodeError::UnmatchedVariant {
                union: self.union,
                keys,
            });
        };

        if self.exclusivity == Exclusivity::Exclusive {
            let rest: Vec<&'static str> = hits.map(|s| s.key).collect();
            if !rest.is_empty() {
                let mut matched = vec![first.key];
                matched.extend(rest);
                return Err(DecodeError::AmbiguousVariant {
                    union: self.union,
                    matched,
                });
            }
        }

        Ok(first)
    }

    pub fn decode(&self, raw: Value) -> Result<T, DecodeError> {
        let mut obj = match raw {
            Value::Object(obj) => obj,
            other => return Err(DecodeError::not_an_object(self.union, &other)),
        };
        let (key, decode) = match self.select(&obj) {
            Ok(sig) => (sig.key, sig.decode),
            Err(e) => {
                tracing::debug!(union = self.union, error = %e, "no signature selected");
                return Err(e);
            }
        };
        match self.placement {
            Placement::Inline => decode(Value::Object(obj)),
            Placement::Nested => decode(obj.remove(key).unwrap_or(Value::Null)),
        }
    }

    /// Inline payloads are emitted as-is (they carry their own signature
    /// key); nested payloads are wrapped as `{key: payload}`.
    pub fn encode<P: Serialize + ?Sized>(
        &self,
        key: &'static str,
        payload: &P,
    ) -> Result<Value, serde_json::Error> {
        let value = serde_json::to_value(payload)?;
        match self.placement {
            Placement::Inline => Ok(value),
            Placement::Nested => {
                let mut obj = Map::new();
                obj.insert(key.to_string(), value);
                Ok(Value::Object(obj))
            }
        }
    }
}

/// Declare a union selected by signature-key presence.
///
/// ```ignore
/// untagged_union! {
///     pub enum ReplyMarkup(Exclusive, Inline) {
///         "inline_keyboard" => InlineKeyboard(InlineKeyboardMarkup),
///         "remove_keyboard" => RemoveKeyboard(ReplyKeyboardRemove),
///     }
/// }
/// ```
///
/// Entries are evaluated top to bottom. Under `Priority` the order is part of
/// the contract and must be documented on the union.
macro_rules! untagged_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident($exclusivity:ident, $placement:ident) {
            $(
                $(#[$vmeta:meta])*
                $key:literal => $variant:ident($payload:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant($payload),
            )+
        }

        impl $name {
            pub fn table() -> &'static $crate::decode::UntaggedTable<$name> {
                static TABLE: std::sync::LazyLock<$crate::decode::UntaggedTable<$name>> =
                    std::sync::LazyLock::new(|| {
                        $crate::decode::UntaggedTable::new(
                            stringify!($name),
                            $crate::decode::Exclusivity::$exclusivity,
                            $crate::decode::Placement::$placement,
                            &[$(
                                (
                                    $key,
                                    stringify!($variant),
                                    (|raw: serde_json::Value| {
                                        $crate::decode::decode_record::<$payload>(stringify!($variant), raw)
                                            .map($name::$variant)
                                    }) as $crate::decode::VariantDecoder<$name>,
                                ),
                            )+],
                        )
                    });
                &TABLE
            }

            /// Key whose presence identifies this variant on the wire.
            pub fn signature_key(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => $key, )+
                }
            }

            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => stringify!($variant), )+
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
                    $( $name::$variant(payload) => Self::table().encode($key, payload), )+
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
pub(crate) use untagged_union;

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::decode::{untagged_union, FromWire};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Circle {
        r: u32,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Square {
        side: u32,
    }

    untagged_union! {
        pub enum Shape(Exclusive, Nested) {
            "circle" => Circle(Circle),
            "square" => Square(Square),
        }
    }

    fn pick_a(_: Value) -> Result<&'static str, DecodeError> {
        Ok("A")
    }

    fn pick_b(_: Value) -> Result<&'static str, DecodeError> {
        Ok("B")
    }

    fn table(exclusivity: Exclusivity) -> UntaggedTable<&'static str> {
        UntaggedTable::new(
            "Pick",
            exclusivity,
            Placement::Inline,
            &[
                ("a", "A", pick_a as VariantDecoder<&'static str>),
                ("b", "B", pick_b as VariantDecoder<&'static str>),
            ],
        )
    }

    #[test]
    fn nested_payload_is_wrapped_under_its_key() {
        let shape = Shape::Circle(Circle { r: 2 });
        let encoded = serde_json::to_value(&shape).unwrap();
        assert_eq!(encoded, json!({"circle": {"r": 2}}));
        assert_eq!(Shape::from_wire(encoded).unwrap(), shape);
        assert_eq!(shape.signature_key(), "circle");
    }

    #[test]
    fn unmatched_lists_sorted_keys() {
        assert_eq!(
            Shape::from_wire(json!({"z": 1, "a": 2})).unwrap_err(),
            DecodeError::UnmatchedVariant {
                union: "Shape",
                keys: vec!["a".to_string(), "z".to_string()],
            }
        );
        assert_eq!(
            Shape::from_wire(json!("circle")).unwrap_err(),
            DecodeError::NotAnObject { union: "Shape", found: "string" }
        );
    }

    #[test]
    fn nested_payload_failure_names_the_variant() {
        let err = Shape::from_wire(json!({"square": {"side": "wide"}})).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed { variant: "Square", field: Some(ref f), .. } if f == "side"
        ));
    }

    #[test]
    fn exclusivity_decides_overlaps() {
        let both = json!({"a": 1, "b": 2});
        assert_eq!(table(Exclusivity::Priority).decode(both.clone()).unwrap(), "A");
        assert_eq!(
            table(Exclusivity::Exclusive).decode(both).unwrap_err(),
            DecodeError::AmbiguousVariant {
                union: "Pick",
                matched: vec!["a", "b"],
            }
        );
        let obj = json!({"b": 0});
        assert_eq!(
            table(Exclusivity::Exclusive).classify(obj.as_object().unwrap()).unwrap(),
            "B"
        );
    }

    #[test]
    #[should_panic(expected = "duplicate signature key `a`")]
    fn duplicate_keys_are_rejected() {
        UntaggedTable::new(
            "Pick",
            Exclusivity::Priority,
            Placement::Inline,
            &[
                ("a", "A", pick_a as VariantDecoder<&'static str>),
                ("a", "B", pick_b as VariantDecoder<&'static str>),
            ],
        );
    }
}
