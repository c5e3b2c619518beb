use serde::{Deserialize, Serialize};

use super::chat::{Chat, User};
use crate::{
    decode::{tagged_union, wire_record},
    ids::{MessageId, UnixTimestamp},
};

tagged_union! {
    /// How a boost was obtained, discriminated by `source`.
    pub enum ChatBoostSource in "source" {
        "premium" => Premium(ChatBoostSourcePremium),
        "gift_code" => GiftCode(ChatBoostSourceGiftCode),
        "giveaway" => Giveaway(ChatBoostSourceGiveaway),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourcePremium {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiftCode {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiveaway {
    pub giveaway_message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize_star_count: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unclaimed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoost {
    pub boost_id: String,
    pub add_date: UnixTimestamp,
    pub expiration_date: UnixTimestamp,
    pub source: ChatBoostSource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostUpdated {
    pub chat: Chat,
    pub boost: ChatBoost,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostRemoved {
    pub chat: Chat,
    pub boost_id: String,
    pub remove_date: UnixTimestamp,
    pub source: ChatBoostSource,
}

wire_record!(ChatBoost, ChatBoostUpdated, ChatBoostRemoved);
