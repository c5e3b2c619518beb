//! Reply markup: inline keyboards, reply keyboards, keyboard removal and
//! force-reply. None of these carry a discriminator on the wire.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::decode::{untagged_union, wire_record};

/// A field that the Bot API only ever sets to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct True;

impl Serialize for True {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for True {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TrueVisitor;

        impl de::Visitor<'_> for TrueVisitor {
            type Value = True;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("`true`")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<True, E> {
                if v {
                    Ok(True)
                } else {
                    Err(E::invalid_value(de::Unexpected::Bool(false), &self))
                }
            }
        }

        deserializer.deserialize_bool(TrueVisitor)
    }
}

untagged_union! {
    /// Markup attached to an outgoing message.
    ///
    /// Each variant owns exactly one of the four signature keys, so the
    /// union is decoded in `Exclusive` mode.
    pub enum ReplyMarkup(Exclusive, Inline) {
        "inline_keyboard" => InlineKeyboard(InlineKeyboardMarkup),
        "keyboard" => Keyboard(ReplyKeyboardMarkup),
        "remove_keyboard" => RemoveKeyboard(ReplyKeyboardRemove),
        "force_reply" => ForceReply(ForceReply),
    }
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        ReplyMarkup::InlineKeyboard(m)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(m: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::Keyboard(m)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// One button per row.
    pub fn column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|b| vec![b]).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(flatten)]
    pub kind: InlineKeyboardButtonKind,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: InlineKeyboardButtonKind::CallbackData(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: InlineKeyboardButtonKind::Url(url.into()),
        }
    }
}

untagged_union! {
    /// What pressing an inline button does. Exactly one action key is present
    /// next to `text`.
    pub enum InlineKeyboardButtonKind(Exclusive, Nested) {
        "url" => Url(String),
        "callback_data" => CallbackData(String),
        "web_app" => WebApp(WebAppInfo),
        "login_url" => LoginUrl(LoginUrl),
        "switch_inline_query" => SwitchInlineQuery(String),
        "switch_inline_query_current_chat" => SwitchInlineQueryCurrentChat(String),
        "switch_inline_query_chosen_chat" => SwitchInlineQueryChosenChat(SwitchInlineQueryChosenChat),
        "copy_text" => CopyText(CopyTextButton),
        "callback_game" => CallbackGame(CallbackGame),
        "pay" => Pay(True),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebAppInfo {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_username: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub request_write_access: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchInlineQueryChosenChat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_user_chats: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_bot_chats: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_group_chats: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_channel_chats: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CopyTextButton {
    pub text: String,
}

/// Placeholder object; the Bot API defines no fields for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackGame {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_persistent: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub resize_keyboard: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub one_time_keyboard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

/// Reply-keyboard button. The request_* options are optional extras on top of
/// the text, not alternatives, so this is a plain record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub request_contact: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub request_location: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

impl KeyboardButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: True,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceReply {
    pub force_reply: True,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

wire_record!(InlineKeyboardMarkup, InlineKeyboardButton, ReplyKeyboardMarkup);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{DecodeError, FromWire};

    #[test]
    fn inline_keyboard_key_selects_inline_variant() {
        let raw = json!({"inline_keyboard": [[{"text": "Go", "callback_data": "go"}]]});
        let markup = ReplyMarkup::from_wire(raw).unwrap();
        let ReplyMarkup::InlineKeyboard(kb) = markup else {
            panic!("expected inline keyboard, got {markup:?}");
        };
        assert_eq!(kb.inline_keyboard[0][0], InlineKeyboardButton::callback("Go", "go"));
    }

    #[test]
    fn remove_keyboard_true_selects_remove_variant() {
        let markup = ReplyMarkup::from_wire(json!({"remove_keyboard": true})).unwrap();
        assert_eq!(
            markup,
            ReplyMarkup::RemoveKeyboard(ReplyKeyboardRemove::default())
        );
        assert_eq!(markup.signature_key(), "remove_keyboard");
    }

    #[test]
    fn remove_keyboard_false_is_malformed_not_unmatched() {
        let err = ReplyMarkup::from_wire(json!({"remove_keyboard": false})).unwrap_err();
        match err {
            DecodeError::Malformed { variant, .. } => assert_eq!(variant, "RemoveKeyboard"),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn two_markup_keys_are_ambiguous() {
        let err = ReplyMarkup::from_wire(json!({"keyboard": [], "force_reply": true})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::AmbiguousVariant {
                union: "ReplyMarkup",
                matched: vec!["keyboard", "force_reply"],
            }
        );
    }

    #[test]
    fn unknown_markup_shape_is_unmatched() {
        let err = ReplyMarkup::from_wire(json!({"hologram": {}})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnmatchedVariant {
                union: "ReplyMarkup",
                keys: vec!["hologram".to_string()],
            }
        );
        assert!(err.is_protocol_skew());
    }

    #[test]
    fn every_markup_variant_reclassifies_after_encoding() {
        let variants = vec![
            ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::column([
                InlineKeyboardButton::url("Docs", "https://core.telegram.org"),
            ])),
            ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
                keyboard: vec![vec![KeyboardButton::text("yes"), KeyboardButton::text("no")]],
                one_time_keyboard: true,
                ..Default::default()
            }),
            ReplyMarkup::RemoveKeyboard(ReplyKeyboardRemove {
                remove_keyboard: True,
                selective: true,
            }),
            ReplyMarkup::ForceReply(ForceReply {
                force_reply: True,
                input_field_placeholder: Some("answer".to_string()),
                selective: false,
            }),
        ];

        for v in variants {
            let encoded = serde_json::to_value(&v).unwrap();
            let decoded = ReplyMarkup::from_wire(encoded).unwrap();
            assert_eq!(decoded.variant_name(), v.variant_name());
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn button_action_is_flattened_next_to_text() {
        let button = InlineKeyboardButton {
            text: "Pay".to_string(),
            kind: InlineKeyboardButtonKind::Pay(True),
        };
        assert_eq!(
            serde_json::to_value(&button).unwrap(),
            json!({"text": "Pay", "pay": true})
        );

        let decoded: InlineKeyboardButton =
            serde_json::from_value(json!({"text": "Play", "callback_game": {}})).unwrap();
        assert_eq!(
            decoded.kind,
            InlineKeyboardButtonKind::CallbackGame(CallbackGame {})
        );
    }

    #[test]
    fn button_without_action_fails_to_decode() {
        let err = serde_json::from_value::<InlineKeyboardButton>(json!({"text": "?"})).unwrap_err();
        assert!(err.to_string().contains("InlineKeyboardButtonKind"));
    }
}
