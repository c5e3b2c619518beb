use serde::{Deserialize, Serialize};

use super::{
    background::ChatBackground, chat::Chat, chat::User, markup::InlineKeyboardMarkup,
    payments::SuccessfulPayment, poll::Poll,
};
use crate::{
    decode::{tagged_union, wire_record},
    ids::{
        BusinessConnectionId, CustomEmojiId, FileId, FileUniqueId, MediaGroupId, MessageId,
        MessageThreadId, Seconds, UnixTimestamp,
    },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<MessageThreadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    pub date: UnixTimestamp,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_connection_id: Option<BusinessConnectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_origin: Option<MessageOrigin>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_topic_message: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<UnixTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<MediaGroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo: Vec<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_background_set: Option<ChatBackground>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    /// Text or caption, whichever the message carries.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// `/command` at offset 0 of the text, without the `@botname` suffix.
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        let entity = self.entities.first()?;
        if entity.offset != 0 || entity.kind != MessageEntityKind::BotCommand {
            return None;
        }
        let raw = text.get(1..entity.length as usize)?;
        Some(raw.split('@').next().unwrap_or(raw))
    }
}

/// Text formatting mode for outgoing text and captions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
    Markdown,
}

/// A styled or semantic span of a message. Offsets and lengths are in UTF-16
/// code units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    pub offset: u32,
    pub length: u32,
    #[serde(flatten)]
    pub kind: MessageEntityKind,
}

tagged_union! {
    /// Entity type. Only a few kinds carry extra fields.
    pub enum MessageEntityKind in "type" {
        "mention" => Mention,
        "hashtag" => Hashtag,
        "cashtag" => Cashtag,
        "bot_command" => BotCommand,
        "url" => Url,
        "email" => Email,
        "phone_number" => PhoneNumber,
        "bold" => Bold,
        "italic" => Italic,
        "underline" => Underline,
        "strikethrough" => Strikethrough,
        "spoiler" => Spoiler,
        "blockquote" => Blockquote,
        "expandable_blockquote" => ExpandableBlockquote,
        "code" => Code,
        "pre" => Pre(PreEntity),
        "text_link" => TextLink(TextLinkEntity),
        "text_mention" => TextMention(TextMentionEntity),
        "custom_emoji" => CustomEmoji(CustomEmojiEntity),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLinkEntity {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMentionEntity {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomEmojiEntity {
    pub custom_emoji_id: CustomEmojiId,
}

tagged_union! {
    /// Where a forwarded message originally came from.
    pub enum MessageOrigin in "type" {
        "user" => User(MessageOriginUser),
        "hidden_user" => HiddenUser(MessageOriginHiddenUser),
        "chat" => Chat(MessageOriginChat),
        "channel" => Channel(MessageOriginChannel),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginUser {
    pub date: UnixTimestamp,
    pub sender_user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginHiddenUser {
    pub date: UnixTimestamp,
    pub sender_user_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginChat {
    pub date: UnixTimestamp,
    pub sender_chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginChannel {
    pub date: UnixTimestamp,
    pub chat: Chat,
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

impl MessageOrigin {
    pub fn date(&self) -> UnixTimestamp {
        match self {
            MessageOrigin::User(o) => o.date,
            MessageOrigin::HiddenUser(o) => o.date,
            MessageOrigin::Chat(o) => o.date,
            MessageOrigin::Channel(o) => o.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub duration: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub duration: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub width: u32,
    pub height: u32,
    pub duration: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub width: u32,
    pub height: u32,
    pub duration: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<CustomEmojiId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub location: Location,
    pub title: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<crate::ids::UserId>,
}

wire_record!(Message, MessageEntity, PhotoSize, Document);
