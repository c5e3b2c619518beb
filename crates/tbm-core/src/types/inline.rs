use serde::{Deserialize, Serialize};

use super::{
    chat::User,
    markup::InlineKeyboardMarkup,
    message::{Location, MessageEntity, ParseMode},
    payments::LabeledPrice,
};
use crate::{
    decode::{tagged_union, untagged_union, wire_record},
    ids::{InlineMessageId, InlineQueryId, InlineQueryResultId, Seconds},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: InlineQueryId,
    pub from: User,
    pub query: String,
    pub offset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: InlineQueryResultId,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<InlineMessageId>,
    pub query: String,
}

/// Returned by `answerWebAppQuery`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SentWebAppMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<InlineMessageId>,
}

tagged_union! {
    /// One entry of an `answerInlineQuery` reply.
    pub enum InlineQueryResult in "type" {
        "article" => Article(InlineQueryResultArticle),
        "photo" => Photo(InlineQueryResultPhoto),
        "gif" => Gif(InlineQueryResultGif),
        "video" => Video(InlineQueryResultVideo),
        "audio" => Audio(InlineQueryResultAudio),
        "document" => Document(InlineQueryResultDocument),
        "location" => Location(InlineQueryResultLocation),
        "venue" => Venue(InlineQueryResultVenue),
        "contact" => Contact(InlineQueryResultContact),
        "game" => Game(InlineQueryResultGame),
    }
}

impl InlineQueryResult {
    pub fn id(&self) -> &InlineQueryResultId {
        match self {
            InlineQueryResult::Article(r) => &r.id,
            InlineQueryResult::Photo(r) => &r.id,
            InlineQueryResult::Gif(r) => &r.id,
            InlineQueryResult::Video(r) => &r.id,
            InlineQueryResult::Audio(r) => &r.id,
            InlineQueryResult::Document(r) => &r.id,
            InlineQueryResult::Location(r) => &r.id,
            InlineQueryResult::Venue(r) => &r.id,
            InlineQueryResult::Contact(r) => &r.id,
            InlineQueryResult::Game(r) => &r.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultArticle {
    pub id: InlineQueryResultId,
    pub title: String,
    pub input_message_content: InputMessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultPhoto {
    pub id: InlineQueryResultId,
    pub photo_url: String,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultGif {
    pub id: InlineQueryResultId,
    pub gif_url: String,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultVideo {
    pub id: InlineQueryResultId,
    pub video_url: String,
    pub mime_type: String,
    pub thumbnail_url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultAudio {
    pub id: InlineQueryResultId,
    pub audio_url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<Seconds>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultDocument {
    pub id: InlineQueryResultId,
    pub title: String,
    pub document_url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultLocation {
    pub id: InlineQueryResultId,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultVenue {
    pub id: InlineQueryResultId,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultContact {
    pub id: InlineQueryResultId,
    pub phone_number: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResultGame {
    pub id: InlineQueryResultId,
    pub game_short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

untagged_union! {
    /// Content sent when an inline result is chosen.
    ///
    /// Evaluated in `Priority` order. A venue carries `latitude` and
    /// `longitude` just like a location, so `address` (venue-only) must be
    /// tested before `latitude`. `message_text`, `phone_number` and
    /// `currency` each belong to exactly one variant, so their position is
    /// free; they stay ahead of the venue/location pair to keep the overlap
    /// local.
    pub enum InputMessageContent(Priority, Inline) {
        "message_text" => Text(InputTextMessageContent),
        "phone_number" => Contact(InputContactMessageContent),
        "currency" => Invoice(InputInvoiceMessageContent),
        "address" => Venue(InputVenueMessageContent),
        "latitude" => Location(InputLocationMessageContent),
    }
}

impl InputMessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        InputMessageContent::Text(InputTextMessageContent {
            message_text: text.into(),
            parse_mode: None,
            entities: Vec::new(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputLocationMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_period: Option<Seconds>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputVenueMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputContactMessageContent {
    pub phone_number: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputInvoiceMessageContent {
    pub title: String,
    pub description: String,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_token: Option<String>,
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
}

wire_record!(InlineQuery, ChosenInlineResult, SentWebAppMessage);
