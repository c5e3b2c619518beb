use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{
    boost::{ChatBoostRemoved, ChatBoostUpdated},
    business::{BusinessConnection, BusinessMessagesDeleted},
    callback::CallbackQuery,
    chat::{Chat, User},
    chat_member::{ChatJoinRequest, ChatMemberUpdated},
    inline::{ChosenInlineResult, InlineQuery},
    message::Message,
    payments::{PaidMediaPurchased, PreCheckoutQuery, ShippingQuery},
    poll::{Poll, PollAnswer},
    reaction::{MessageReactionCountUpdated, MessageReactionUpdated},
};
use crate::{
    decode::{json_kind, nested_error, untagged_union, DecodeError, FromWire},
    ids::UpdateId,
};

untagged_union! {
    /// What happened. Exactly one payload key is present next to `update_id`.
    pub enum UpdateKind(Exclusive, Nested) {
        "message" => Message(Message),
        "edited_message" => EditedMessage(Message),
        "channel_post" => ChannelPost(Message),
        "edited_channel_post" => EditedChannelPost(Message),
        "business_connection" => BusinessConnection(BusinessConnection),
        "business_message" => BusinessMessage(Message),
        "edited_business_message" => EditedBusinessMessage(Message),
        "deleted_business_messages" => DeletedBusinessMessages(BusinessMessagesDeleted),
        "message_reaction" => MessageReaction(MessageReactionUpdated),
        "message_reaction_count" => MessageReactionCount(MessageReactionCountUpdated),
        "inline_query" => InlineQuery(InlineQuery),
        "chosen_inline_result" => ChosenInlineResult(ChosenInlineResult),
        "callback_query" => CallbackQuery(CallbackQuery),
        "shipping_query" => ShippingQuery(ShippingQuery),
        "pre_checkout_query" => PreCheckoutQuery(PreCheckoutQuery),
        "purchased_paid_media" => PurchasedPaidMedia(PaidMediaPurchased),
        "poll" => Poll(Poll),
        "poll_answer" => PollAnswer(PollAnswer),
        "my_chat_member" => MyChatMember(ChatMemberUpdated),
        "chat_member" => ChatMember(ChatMemberUpdated),
        "chat_join_request" => ChatJoinRequest(ChatJoinRequest),
        "chat_boost" => ChatBoost(ChatBoostUpdated),
        "removed_chat_boost" => RemovedChatBoost(ChatBoostRemoved),
    }
}

impl UpdateKind {
    /// The message carried by any of the message-shaped kinds.
    pub fn message(&self) -> Option<&Message> {
        match self {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m)
            | UpdateKind::BusinessMessage(m)
            | UpdateKind::EditedBusinessMessage(m) => Some(m),
            _ => None,
        }
    }
}

/// One entry of `getUpdates`.
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    pub id: UpdateId,
    pub kind: UpdateKind,
}

const UPDATE_ID: &str = "update_id";

impl Update {
    /// Read `update_id` without decoding the rest, so a poller can advance
    /// past an update it failed to decode.
    pub fn peek_id(raw: &Value) -> Option<UpdateId> {
        raw.get(UPDATE_ID)?.as_i64().map(UpdateId::new)
    }

    /// Chat the update happened in, if it has one.
    pub fn chat(&self) -> Option<&Chat> {
        if let Some(m) = self.kind.message() {
            return Some(&m.chat);
        }
        match &self.kind {
            UpdateKind::CallbackQuery(q) => q.message.as_ref().map(|m| &m.chat),
            UpdateKind::DeletedBusinessMessages(d) => Some(&d.chat),
            UpdateKind::MessageReaction(r) => Some(&r.chat),
            UpdateKind::MessageReactionCount(r) => Some(&r.chat),
            UpdateKind::PollAnswer(a) => a.voter_chat.as_ref(),
            UpdateKind::MyChatMember(m) | UpdateKind::ChatMember(m) => Some(&m.chat),
            UpdateKind::ChatJoinRequest(r) => Some(&r.chat),
            UpdateKind::ChatBoost(b) => Some(&b.chat),
            UpdateKind::RemovedChatBoost(b) => Some(&b.chat),
            _ => None,
        }
    }

    /// User that caused the update, if known.
    pub fn from(&self) -> Option<&User> {
        if let Some(m) = self.kind.message() {
            return m.from.as_ref();
        }
        match &self.kind {
            UpdateKind::BusinessConnection(c) => Some(&c.user),
            UpdateKind::MessageReaction(r) => r.user.as_ref(),
            UpdateKind::InlineQuery(q) => Some(&q.from),
            UpdateKind::ChosenInlineResult(r) => Some(&r.from),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            UpdateKind::ShippingQuery(q) => Some(&q.from),
            UpdateKind::PreCheckoutQuery(q) => Some(&q.from),
            UpdateKind::PurchasedPaidMedia(p) => Some(&p.from),
            UpdateKind::PollAnswer(a) => a.user.as_ref(),
            UpdateKind::MyChatMember(m) | UpdateKind::ChatMember(m) => Some(&m.from),
            UpdateKind::ChatJoinRequest(r) => Some(&r.from),
            _ => None,
        }
    }
}

impl FromWire for Update {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        let mut obj = match raw {
            Value::Object(obj) => obj,
            other => {
                return Err(DecodeError::NotAnObject {
                    union: "Update",
                    found: json_kind(&other),
                })
            }
        };
        let id = match obj.remove(UPDATE_ID) {
            Some(v) => serde_json::from_value::<UpdateId>(v)
                .map_err(|e| DecodeError::malformed("Update", e))?,
            None => {
                return Err(DecodeError::Malformed {
                    variant: "Update",
                    field: Some(UPDATE_ID.to_string()),
                    detail: format!("missing field `{UPDATE_ID}`"),
                })
            }
        };
        let kind = UpdateKind::from_wire(Value::Object(obj))?;
        Ok(Update { id, kind })
    }
}

impl Serialize for Update {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = serde_json::to_value(&self.kind).map_err(ser::Error::custom)?;
        if let Value::Object(obj) = &mut value {
            obj.insert(UPDATE_ID.to_string(), Value::from(self.id.get()));
        }
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Update::from_wire(raw).map_err(nested_error)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ids::{ChatId, MessageId, UserId};

    fn message_body() -> Value {
        json!({
            "message_id": 10,
            "date": 1_700_000_000,
            "chat": {"id": 42, "type": "private", "first_name": "Ann"},
            "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
            "text": "hello"
        })
    }

    #[test]
    fn message_key_selects_message_kind() {
        let update = Update::from_wire(json!({"update_id": 1, "message": message_body()})).unwrap();
        assert_eq!(update.id, UpdateId::new(1));
        assert_eq!(update.kind.variant_name(), "Message");
        let UpdateKind::Message(m) = &update.kind else {
            panic!("expected message, got {:?}", update.kind);
        };
        assert_eq!(m.message_id, MessageId::new(10));
        assert_eq!(update.chat().map(|c| c.id), Some(ChatId::new(42)));
        assert_eq!(update.from().map(|u| u.id), Some(UserId::new(42)));
    }

    #[test]
    fn edited_message_key_selects_edited_kind() {
        let kind = UpdateKind::from_wire(json!({"edited_message": message_body()})).unwrap();
        assert_eq!(kind.variant_name(), "EditedMessage");
        assert_eq!(kind.signature_key(), "edited_message");
    }

    #[test]
    fn future_update_kind_is_unmatched() {
        let err = Update::from_wire(json!({"update_id": 7, "bogus_future_field": {"x": 1}}))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnmatchedVariant {
                union: "UpdateKind",
                keys: vec!["bogus_future_field".to_string()],
            }
        );
        assert!(err.is_protocol_skew());
        assert_eq!(
            Update::peek_id(&json!({"update_id": 7, "bogus_future_field": {}})),
            Some(UpdateId::new(7))
        );
    }

    #[test]
    fn unknown_variants_deep_inside_a_payload_stay_skew() {
        let mut entity = message_body();
        entity["entities"] = json!([{"type": "date_time", "offset": 0, "length": 5}]);
        let mut chat_type = message_body();
        chat_type["chat"]["type"] = json!("direct_messages");
        let member = json!({
            "chat": {"id": -100, "type": "supergroup", "title": "g"},
            "from": {"id": 1, "is_bot": false, "first_name": "A"},
            "date": 1,
            "old_chat_member": {"status": "left", "user": {"id": 2, "is_bot": true, "first_name": "B"}},
            "new_chat_member": {"status": "future_status", "user": {"id": 2, "is_bot": true, "first_name": "B"}}
        });

        let cases = [
            (json!({"update_id": 1, "message": entity}), "Message", "MessageEntityKind", "date_time"),
            (json!({"update_id": 2, "message": chat_type}), "Message", "ChatKind", "direct_messages"),
            (json!({"update_id": 3, "my_chat_member": member}), "MyChatMember", "ChatMember", "future_status"),
        ];
        for (raw, record, union, tag) in cases {
            let err = Update::from_wire(raw).unwrap_err();
            assert!(err.is_protocol_skew(), "{err}");
            assert_eq!(err.subject(), Some(record));
            assert_eq!(
                err.root_cause(),
                &DecodeError::UnrecognizedVariant {
                    union,
                    discriminator: tag.to_string(),
                }
            );
        }
    }

    #[test]
    fn two_payload_keys_are_ambiguous() {
        let err = UpdateKind::from_wire(json!({
            "message": message_body(),
            "edited_message": message_body()
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::AmbiguousVariant {
                union: "UpdateKind",
                matched: vec!["message", "edited_message"],
            }
        );
    }

    #[test]
    fn missing_update_id_is_malformed() {
        let err = Update::from_wire(json!({"message": message_body()})).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed { variant: "Update", field: Some(ref f), .. } if f == UPDATE_ID
        ));
    }

    #[test]
    fn table_lists_every_update_kind() {
        assert_eq!(UpdateKind::table().keys().len(), 23);
    }

    #[test]
    fn update_round_trips_through_serde() {
        let raw = json!({"update_id": 3, "edited_message": message_body()});
        let update: Update = serde_json::from_value(raw).unwrap();
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(encoded["update_id"], 3);
        assert_eq!(Update::from_wire(encoded).unwrap(), update);
    }
}
