//! The `{ok, result | error_code, description, parameters}` wrapper around
//! every Bot API response.
//!
//! A remote failure is data, not an error: it decodes to
//! [`CallResult::Failure`]. Only a response that can't be read at all is a
//! [`DecodeError`].

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    decode::{DecodeError, FromWire},
    ids::{ChatId, Seconds},
};

/// Extra failure details the server may attach.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<ChatId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<Seconds>,
}

/// A failed call as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}{description}", fmt_code(.code))]
pub struct ApiFailure {
    pub code: Option<i32>,
    pub description: String,
    pub retry_after: Option<Seconds>,
    pub migrate_to_chat_id: Option<ChatId>,
}

fn fmt_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("[{c}] "),
        None => String::new(),
    }
}

impl ApiFailure {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            description: description.into(),
            retry_after: None,
            migrate_to_chat_id: None,
        }
    }

    /// 429 with a server-supplied wait.
    pub fn is_flood_wait(&self) -> bool {
        self.retry_after.is_some()
    }

    /// The group was upgraded to a supergroup with a new id.
    pub fn is_migration(&self) -> bool {
        self.migrate_to_chat_id.is_some()
    }

    fn parameters(&self) -> Option<ResponseParameters> {
        if self.retry_after.is_none() && self.migrate_to_chat_id.is_none() {
            return None;
        }
        Some(ResponseParameters {
            migrate_to_chat_id: self.migrate_to_chat_id,
            retry_after: self.retry_after,
        })
    }
}

/// Outcome of one Bot API call.
#[derive(Clone, Debug, PartialEq)]
pub enum CallResult<T> {
    Success(T),
    Failure(ApiFailure),
}

impl<T> CallResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            CallResult::Success(v) => Some(v),
            CallResult::Failure(_) => None,
        }
    }

    pub fn failure(self) -> Option<ApiFailure> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure(f) => Some(f),
        }
    }

    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            CallResult::Success(v) => Ok(v),
            CallResult::Failure(f) => Err(f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallResult<U> {
        match self {
            CallResult::Success(v) => CallResult::Success(f(v)),
            CallResult::Failure(e) => CallResult::Failure(e),
        }
    }

    /// Server-requested wait, if the call failed with one.
    pub fn retry_after(&self) -> Option<Seconds> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure(f) => f.retry_after,
        }
    }
}

const UNION: &str = "CallResult";

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

fn decode_failure(obj: &Map<String, Value>) -> Result<ApiFailure, DecodeError> {
    let code = match field(obj, "error_code") {
        None => None,
        Some(v) => Some(
            v.as_i64()
                .and_then(|c| i32::try_from(c).ok())
                .ok_or_else(|| DecodeError::Malformed {
                    variant: UNION,
                    field: Some("error_code".to_string()),
                    detail: format!("expected a 32-bit integer, found {v}"),
                })?,
        ),
    };
    let description = match field(obj, "description") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(DecodeError::Malformed {
                variant: UNION,
                field: Some("description".to_string()),
                detail: format!("expected a string, found {other}"),
            })
        }
    };
    let params = match field(obj, "parameters") {
        None => ResponseParameters::default(),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| DecodeError::malformed("ResponseParameters", e))?,
    };
    Ok(ApiFailure {
        code,
        description,
        retry_after: params.retry_after,
        migrate_to_chat_id: params.migrate_to_chat_id,
    })
}

impl<T: FromWire> FromWire for CallResult<T> {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        let mut obj = match raw {
            Value::Object(obj) => obj,
            other => return Err(DecodeError::not_an_object(UNION, &other)),
        };
        let Some(ok) = obj.get("ok").and_then(Value::as_bool) else {
            return Err(DecodeError::MissingDiscriminator {
                union: UNION,
                field: "ok",
            });
        };
        if !ok {
            return decode_failure(&obj).map(CallResult::Failure);
        }
        // `true` results (setMyCommands, deleteMessage, ...) are still present.
        let Some(result) = obj.remove("result") else {
            return Err(DecodeError::Malformed {
                variant: UNION,
                field: Some("result".to_string()),
                detail: "missing field `result`".to_string(),
            });
        };
        T::from_wire(result).map(CallResult::Success)
    }
}

impl<T: Serialize> Serialize for CallResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CallResult::Success(v) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("result", v)?;
                map.end()
            }
            CallResult::Failure(f) => {
                let params = f.parameters();
                let len = 2 + usize::from(f.code.is_some()) + usize::from(params.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("ok", &false)?;
                if let Some(code) = f.code {
                    map.serialize_entry("error_code", &code)?;
                }
                map.serialize_entry("description", &f.description)?;
                if let Some(params) = &params {
                    map.serialize_entry("parameters", params)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::decode_str;
    use crate::types::User;

    #[test]
    fn flood_wait_failure_carries_retry_after() {
        let res: CallResult<bool> = decode_str(
            r#"{"ok":false,"error_code":429,"description":"Too Many Requests","parameters":{"retry_after":5}}"#,
        )
        .unwrap();
        let failure = res.failure().unwrap();
        assert_eq!(failure.code, Some(429));
        assert_eq!(failure.description, "Too Many Requests");
        assert_eq!(failure.retry_after, Some(Seconds::new(5)));
        assert!(failure.is_flood_wait());
        assert_eq!(failure.to_string(), "[429] Too Many Requests");
    }

    #[test]
    fn success_decodes_result_with_target_type() {
        let res = CallResult::<User>::from_wire(json!({
            "ok": true,
            "result": {"id": 99, "is_bot": true, "first_name": "Bot", "username": "the_bot"}
        }))
        .unwrap();
        assert!(res.is_success());
        assert_eq!(res.retry_after(), None);
        let user = res.into_result().unwrap();
        assert_eq!(user.username.as_deref(), Some("the_bot"));
    }

    #[test]
    fn failure_is_never_an_error() {
        let res = CallResult::<User>::from_wire(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: group chat was upgraded to a supergroup chat",
            "parameters": {"migrate_to_chat_id": -1001234}
        }))
        .unwrap();
        let failure = res.into_result().unwrap_err();
        assert!(failure.is_migration());
        assert_eq!(failure.migrate_to_chat_id, Some(ChatId::new(-1001234)));
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let res = CallResult::<bool>::from_wire(json!({"ok": false})).unwrap();
        let failure = res.failure().unwrap();
        assert_eq!(failure.code, None);
        assert_eq!(failure.description, "");
    }

    #[test]
    fn missing_ok_flag_or_result_is_a_decode_error() {
        let err = CallResult::<bool>::from_wire(json!({"result": true})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingDiscriminator {
                union: "CallResult",
                field: "ok"
            }
        );

        let err = CallResult::<bool>::from_wire(json!({"ok": true})).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { variant: "CallResult", .. }));
    }

    #[test]
    fn result_decode_failure_is_typed() {
        let err = CallResult::<User>::from_wire(json!({"ok": true, "result": {"id": 1}})).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { variant: "User", .. }));
    }

    #[test]
    fn map_preserves_failure() {
        let res: CallResult<i64> = CallResult::Failure(ApiFailure::new(403, "Forbidden"));
        let mapped = res.map(|n| n + 1);
        assert_eq!(mapped.failure().map(|f| f.code), Some(Some(403)));

        let ok: CallResult<i64> = CallResult::Success(1);
        assert_eq!(ok.map(|n| n + 1).success(), Some(2));
    }

    #[test]
    fn envelope_serializes_back_to_wire_shape() {
        let failure = ApiFailure {
            retry_after: Some(Seconds::new(5)),
            ..ApiFailure::new(429, "Too Many Requests")
        };
        let res: CallResult<bool> = CallResult::Failure(failure);
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({"ok": false, "error_code": 429, "description": "Too Many Requests", "parameters": {"retry_after": 5}})
        );
        let back = CallResult::<bool>::from_wire(serde_json::to_value(&res).unwrap()).unwrap();
        assert_eq!(back, res);
    }
}
