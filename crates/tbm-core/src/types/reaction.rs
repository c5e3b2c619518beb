use serde::{Deserialize, Serialize};

use super::chat::{Chat, User};
use crate::{
    decode::{tagged_union, wire_record},
    ids::{CustomEmojiId, MessageId, UnixTimestamp},
};

tagged_union! {
    pub enum ReactionType in "type" {
        "emoji" => Emoji(ReactionTypeEmoji),
        "custom_emoji" => CustomEmoji(ReactionTypeCustomEmoji),
        "paid" => Paid,
    }
}

impl ReactionType {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        ReactionType::Emoji(ReactionTypeEmoji {
            emoji: emoji.into(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionTypeEmoji {
    pub emoji: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionTypeCustomEmoji {
    pub custom_emoji_id: CustomEmojiId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionCount {
    #[serde(rename = "type")]
    pub kind: ReactionType,
    pub total_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageReactionUpdated {
    pub chat: Chat,
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_chat: Option<Chat>,
    pub date: UnixTimestamp,
    pub old_reaction: Vec<ReactionType>,
    pub new_reaction: Vec<ReactionType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageReactionCountUpdated {
    pub chat: Chat,
    pub message_id: MessageId,
    pub date: UnixTimestamp,
    pub reactions: Vec<ReactionCount>,
}

wire_record!(MessageReactionUpdated, MessageReactionCountUpdated);
