//! Nominal identifiers.
//!
//! Every identifier that crosses the wire gets its own single-field type. Two
//! domains built from the same primitive never compare equal and can't be
//! passed where the other is expected:
//!
//! ```compile_fail
//! use tbm_core::ids::{ChatId, UserId};
//!
//! fn kick(_chat: ChatId) {}
//! kick(UserId::new(42));
//! ```
//!
//! ```compile_fail
//! use tbm_core::ids::{ChatId, UserId};
//!
//! assert!(ChatId::new(42) != UserId::new(42));
//! ```
//!
//! Crossing domains requires a named conversion such as
//! [`UserId::as_private_chat`]. On the wire every identifier is its bare
//! primitive (`#[serde(transparent)]`). `Display` prefixes the domain so log
//! lines never mix two domains up (`chat:42` vs `user:42`).

use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $T:ident($inner:ty) => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $T($inner);

        impl $T {
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// The bare wire value.
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $T:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $T(String);

        impl $T {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

numeric_id! {
    /// Chat id. Negative for groups and channels.
    ChatId(i64) => "chat"
}

numeric_id! {
    /// User (or bot) id.
    UserId(i64) => "user"
}

numeric_id! {
    /// Message id, unique within a chat.
    MessageId(i32) => "message"
}

numeric_id! {
    /// Forum topic / message thread id.
    MessageThreadId(i32) => "thread"
}

numeric_id! {
    /// Monotonic update id used as the `getUpdates` offset.
    UpdateId(i64) => "update"
}

numeric_id! {
    /// A duration in whole seconds (`retry_after`, media durations, ...).
    Seconds(u32) => "seconds"
}

numeric_id! {
    /// Seconds since the Unix epoch.
    UnixTimestamp(i64) => "unix"
}

string_id! {
    /// Id of a message sent via inline mode.
    InlineMessageId => "inline_message"
}

string_id! {
    CallbackQueryId => "callback_query"
}

string_id! {
    InlineQueryId => "inline_query"
}

string_id! {
    /// Bot-chosen id of a single inline query result.
    InlineQueryResultId => "inline_result"
}

string_id! {
    /// File id; valid for download and re-sending.
    FileId => "file"
}

string_id! {
    /// Stable file id; can't be used to download or re-send.
    FileUniqueId => "file_unique"
}

string_id! {
    ShippingQueryId => "shipping_query"
}

string_id! {
    PreCheckoutQueryId => "pre_checkout_query"
}

string_id! {
    WebAppQueryId => "web_app_query"
}

string_id! {
    CustomEmojiId => "custom_emoji"
}

string_id! {
    /// Telegram or provider payment charge id.
    PaymentChargeId => "payment_charge"
}

string_id! {
    BusinessConnectionId => "business_connection"
}

string_id! {
    PollId => "poll"
}

string_id! {
    MediaGroupId => "media_group"
}

impl UserId {
    /// The private chat between the bot and this user shares the user's id.
    pub const fn as_private_chat(self) -> ChatId {
        ChatId(self.0)
    }
}

impl ChatId {
    /// Private chats have positive ids equal to the peer's user id.
    pub const fn as_user(self) -> Option<UserId> {
        if self.0 > 0 {
            Some(UserId(self.0))
        } else {
            None
        }
    }
}

impl Seconds {
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }
}

impl UnixTimestamp {
    /// `None` if the value is out of chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.0, 0)
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn same_primitive_different_domains_render_differently() {
        assert_eq!(ChatId::new(42).to_string(), "chat:42");
        assert_eq!(UserId::new(42).to_string(), "user:42");
        assert_ne!(TypeId::of::<ChatId>(), TypeId::of::<UserId>());
        assert_ne!(
            format!("{:?}", FileId::new("abc")),
            format!("{:?}", FileUniqueId::new("abc"))
        );
    }

    #[test]
    fn wire_form_is_the_bare_primitive() {
        assert_eq!(serde_json::to_value(ChatId::new(-100)).unwrap(), serde_json::json!(-100));
        assert_eq!(
            serde_json::to_value(CallbackQueryId::new("q1")).unwrap(),
            serde_json::json!("q1")
        );

        let id: MessageId = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(id.get(), 7);
        let id: BusinessConnectionId = serde_json::from_value(serde_json::json!("bc")).unwrap();
        assert_eq!(id.as_str(), "bc");
    }

    #[test]
    fn construction_does_not_validate() {
        assert_eq!(ChatId::new(0).get(), 0);
        assert_eq!(FileId::new("").as_str(), "");
    }

    #[test]
    fn hashing_is_per_domain() {
        let mut chats = HashSet::new();
        chats.insert(ChatId::new(1));
        chats.insert(ChatId::new(1));
        chats.insert(ChatId::new(2));
        assert_eq!(chats.len(), 2);
    }

    #[test]
    fn named_conversions() {
        assert_eq!(UserId::new(5).as_private_chat(), ChatId::new(5));
        assert_eq!(ChatId::new(5).as_user(), Some(UserId::new(5)));
        assert_eq!(ChatId::new(-1001).as_user(), None);
        assert_eq!(Seconds::new(5).as_duration(), Duration::from_secs(5));

        let ts = UnixTimestamp::new(1_700_000_000);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(UnixTimestamp::from_datetime(dt), ts);
    }
}
