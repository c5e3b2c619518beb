//! Wire decoding engine.
//!
//! Every Bot API union is declared with [`tagged_union!`] (explicit
//! discriminator field) or [`untagged_union!`] (variant chosen by which
//! signature key is present). Both macros build a lazily initialized,
//! read-only dispatch table and implement [`FromWire`], `Serialize` and
//! `Deserialize` on top of it.
//!
//! [`FromWire`] is the typed entry point: it keeps the distinction between
//! protocol skew ([`DecodeError::UnrecognizedVariant`],
//! [`DecodeError::UnmatchedVariant`]) and a payload that is simply broken
//! ([`DecodeError::Malformed`]). The serde impls exist so unions can nest
//! inside ordinary `#[derive(Deserialize)]` records. Serde can only carry a
//! string across that boundary, so a union that fails there also parks its
//! typed error in a thread-local slot, and [`decode_record`] picks it up as
//! [`DecodeError::Nested`] on the enclosing record.

mod tagged;
mod untagged;

use std::cell::RefCell;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use tagged::TaggedTable;
pub use untagged::{Exclusivity, Placement, UntaggedTable};

pub(crate) use tagged::tagged_union;
#[cfg(test)]
pub(crate) use tagged::assert_round_trips;
pub(crate) use untagged::untagged_union;

/// Decoder for a single variant; receives the value chosen by the dispatcher.
pub type VariantDecoder<T> = fn(Value) -> Result<T, DecodeError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{union}: expected a JSON object, found {found}")]
    NotAnObject {
        union: &'static str,
        found: &'static str,
    },

    #[error("{union}: discriminator `{field}` is missing or not a string")]
    MissingDiscriminator {
        union: &'static str,
        field: &'static str,
    },

    #[error("unrecognized {union} variant `{discriminator}`")]
    UnrecognizedVariant {
        union: &'static str,
        discriminator: String,
    },

    #[error("no {union} variant matches keys [{}]", .keys.join(", "))]
    UnmatchedVariant {
        union: &'static str,
        keys: Vec<String>,
    },

    #[error("ambiguous {union}: keys [{}] each select a variant", .matched.join(", "))]
    AmbiguousVariant {
        union: &'static str,
        matched: Vec<&'static str>,
    },

    #[error("malformed {variant}{}: {detail}", fmt_field(.field))]
    Malformed {
        variant: &'static str,
        field: Option<String>,
        detail: String,
    },

    /// A union inside a plain record failed; `source` is its typed error.
    #[error("{record}{}: {source}", fmt_field(.field))]
    Nested {
        record: &'static str,
        field: Option<String>,
        source: Box<DecodeError>,
    },

    #[error("invalid json: {0}")]
    InvalidJson(String),
}

fn fmt_field(field: &Option<String>) -> String {
    match field {
        Some(f) => format!(" (field `{f}`)"),
        None => String::new(),
    }
}

impl DecodeError {
    /// Build a `Malformed` error from a serde failure, keeping the field name
    /// when serde reports one.
    pub fn malformed(variant: &'static str, err: serde_json::Error) -> Self {
        let detail = err.to_string();
        DecodeError::Malformed {
            variant,
            field: offending_field(&detail),
            detail,
        }
    }

    pub(crate) fn not_an_object(union: &'static str, raw: &Value) -> Self {
        DecodeError::NotAnObject {
            union,
            found: json_kind(raw),
        }
    }

    /// True when the payload is well-formed but uses a shape this crate
    /// doesn't know yet (new variant, new update kind), at any depth.
    pub fn is_protocol_skew(&self) -> bool {
        matches!(
            self.root_cause(),
            DecodeError::UnrecognizedVariant { .. }
                | DecodeError::UnmatchedVariant { .. }
                | DecodeError::AmbiguousVariant { .. }
        )
    }

    /// Innermost error behind any [`DecodeError::Nested`] wrappers.
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let DecodeError::Nested { source, .. } = err {
            err = source;
        }
        err
    }

    /// Union (or record) the failure was reported against.
    pub fn subject(&self) -> Option<&'static str> {
        match self {
            DecodeError::NotAnObject { union, .. }
            | DecodeError::MissingDiscriminator { union, .. }
            | DecodeError::UnrecognizedVariant { union, .. }
            | DecodeError::UnmatchedVariant { union, .. }
            | DecodeError::AmbiguousVariant { union, .. } => Some(union),
            DecodeError::Malformed { variant, .. } => Some(variant),
            DecodeError::Nested { record, .. } => Some(record),
            DecodeError::InvalidJson(_) => None,
        }
    }
}

fn offending_field(detail: &str) -> Option<String> {
    let start = detail.find("field `")? + "field `".len();
    let len = detail[start..].find('`')?;
    Some(detail[start..start + len].to_string())
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed conversion from a generic JSON tree.
pub trait FromWire: Sized {
    fn from_wire(raw: Value) -> Result<Self, DecodeError>;
}

/// Parse JSON text and decode it.
pub fn decode_str<T: FromWire>(text: &str) -> Result<T, DecodeError> {
    let raw: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    T::from_wire(raw)
}

thread_local! {
    static NESTED: RefCell<Option<DecodeError>> = const { RefCell::new(None) };
}

/// Serde error for a union that failed inside a derived record. The typed
/// error waits in [`NESTED`] until the enclosing [`decode_record`] takes it.
pub(crate) fn nested_error<E: serde::de::Error>(err: DecodeError) -> E {
    let wrapped = E::custom(&err);
    NESTED.with(|slot| *slot.borrow_mut() = Some(err));
    wrapped
}

fn take_nested() -> Option<DecodeError> {
    NESTED.with(|slot| slot.borrow_mut().take())
}

/// Decode a plain record (no dispatch of its own) through serde.
///
/// `field` on the resulting error is the serde path to the offending value
/// (`chat.id`, `entities[0]`), or the missing field's name at the top level.
pub fn decode_record<T: DeserializeOwned>(
    variant: &'static str,
    raw: Value,
) -> Result<T, DecodeError> {
    take_nested();
    serde_path_to_error::deserialize(raw).map_err(|err| {
        let at = err.path().to_string();
        let inner = err.into_inner();
        let detail = inner.to_string();
        let field = field_at(&at, &detail);
        match take_nested() {
            Some(source) if detail.contains(&source.to_string()) => DecodeError::Nested {
                record: variant,
                field,
                source: Box::new(source),
            },
            _ => DecodeError::Malformed {
                variant,
                field,
                detail,
            },
        }
    })
}

fn field_at(path: &str, detail: &str) -> Option<String> {
    let named = offending_field(detail);
    if path == "." {
        return named;
    }
    match named {
        Some(f) if detail.starts_with("missing field") => Some(format!("{path}.{f}")),
        _ => Some(path.to_string()),
    }
}

/// Implement [`FromWire`] for plain serde records.
macro_rules! wire_record {
    ($($T:ty),+ $(,)?) => {
        $(
            impl $crate::decode::FromWire for $T {
                fn from_wire(raw: serde_json::Value) -> Result<Self, $crate::decode::DecodeError> {
                    $crate::decode::decode_record(stringify!($T), raw)
                }
            }
        )+
    };
}
pub(crate) use wire_record;

wire_record!(bool, i32, i64, String);

impl FromWire for Value {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        Ok(raw)
    }
}

impl<T: FromWire> FromWire for Option<T> {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Null => Ok(None),
            other => T::from_wire(other).map(Some),
        }
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Array(items) => items.into_iter().map(T::from_wire).collect(),
            other => Err(DecodeError::Malformed {
                variant: "array",
                field: None,
                detail: format!("expected an array, found {}", json_kind(&other)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn malformed_keeps_missing_field_name() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            chat: i64,
        }

        let err = decode_record::<Needs>("Needs", json!({})).unwrap_err();
        match err {
            DecodeError::Malformed { variant, field, .. } => {
                assert_eq!(variant, "Needs");
                assert_eq!(field.as_deref(), Some("chat"));
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn mistyped_field_is_named_by_path() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Inner {
            id: i64,
        }
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Outer {
            count: i32,
            inner: Inner,
        }

        let err = decode_record::<Outer>("Outer", json!({"count": "abc", "inner": {"id": 1}}))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { ref field, .. } if field.as_deref() == Some("count")));

        let err = decode_record::<Outer>("Outer", json!({"count": 1, "inner": {"id": "x"}}))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { ref field, .. } if field.as_deref() == Some("inner.id")));

        let err = decode_record::<Outer>("Outer", json!({"count": 1, "inner": {}})).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { ref field, .. } if field.as_deref() == Some("inner.id")));
    }

    #[test]
    fn nested_wraps_and_delegates_skew() {
        let inner = DecodeError::UnrecognizedVariant {
            union: "ChatKind",
            discriminator: "direct_messages".to_string(),
        };
        let err = DecodeError::Nested {
            record: "Message",
            field: Some("chat".to_string()),
            source: Box::new(DecodeError::Nested {
                record: "Chat",
                field: None,
                source: Box::new(inner.clone()),
            }),
        };
        assert!(err.is_protocol_skew());
        assert_eq!(err.root_cause(), &inner);
        assert_eq!(err.subject(), Some("Message"));
        assert_eq!(
            err.to_string(),
            "Message (field `chat`): Chat: unrecognized ChatKind variant `direct_messages`"
        );
    }

    #[test]
    fn stale_slot_does_not_leak_into_unrelated_failures() {
        let _ = nested_error::<serde_json::Error>(DecodeError::InvalidJson("old".to_string()));
        let err = decode_record::<i64>("Count", json!("x")).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { variant: "Count", .. }));
    }

    #[test]
    fn invalid_json_is_its_own_kind() {
        let err = decode_str::<Value>("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
        assert!(!err.is_protocol_skew());
        assert_eq!(err.subject(), None);
    }

    #[test]
    fn vec_and_option_decode_element_wise() {
        let v: Vec<i64> = Vec::from_wire(json!([1, 2, 3])).unwrap();
        assert_eq!(v, vec![1, 2, 3]);

        let none: Option<String> = Option::from_wire(Value::Null).unwrap();
        assert_eq!(none, None);

        let err = Vec::<i64>::from_wire(json!({"a": 1})).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { variant: "array", .. }));
    }

    #[test]
    fn display_names_the_union_and_keys() {
        let err = DecodeError::UnmatchedVariant {
            union: "Update",
            keys: vec!["bogus".to_string(), "update_id".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no Update variant matches keys [bogus, update_id]"
        );

        let err = DecodeError::Malformed {
            variant: "Message",
            field: Some("chat".to_string()),
            detail: "missing field `chat`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed Message (field `chat`): missing field `chat`"
        );
    }
}
