//! Outgoing Bot API calls.
//!
//! A request is a serde record whose JSON form is the call's parameter
//! object; [`Request::METHOD`] names the endpoint and [`Request::Response`]
//! is what a successful call's `result` decodes to.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    decode::{DecodeError, FromWire},
    ids::{
        CallbackQueryId, ChatId, FileId, InlineMessageId, InlineQueryId, MessageId,
        MessageThreadId, UpdateId, UserId, WebAppQueryId,
    },
    types::{
        BotCommand, BotCommandScope, ChatMember, File, InlineKeyboardMarkup, InlineQueryResult,
        InputMedia, MenuButton, Message, MessageEntity, ParseMode, ReactionType, ReplyMarkup,
        SentWebAppMessage, User,
    },
};

pub trait Request: Serialize {
    const METHOD: &'static str;
    type Response: FromWire;
}

/// Target chat: a numeric id or a public `@username`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipient {
    Id(ChatId),
    Username(String),
}

impl From<ChatId> for Recipient {
    fn from(id: ChatId) -> Self {
        Recipient::Id(id)
    }
}

impl From<&str> for Recipient {
    fn from(username: &str) -> Self {
        Recipient::Username(username.to_string())
    }
}

impl From<String> for Recipient {
    fn from(username: String) -> Self {
        Recipient::Username(username)
    }
}

/// Result of an edit: the edited message, or `true` for inline-mode messages.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageOrEdit {
    Message(Box<Message>),
    Inline,
}

impl FromWire for MessageOrEdit {
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Bool(true) => Ok(MessageOrEdit::Inline),
            Value::Object(_) => Message::from_wire(raw).map(|m| MessageOrEdit::Message(Box::new(m))),
            other => Err(DecodeError::Malformed {
                variant: "MessageOrEdit",
                field: None,
                detail: format!("expected a message or `true`, found {other}"),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GetMe {}

impl Request for GetMe {
    const METHOD: &'static str = "getMe";
    type Response = User;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<UpdateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
    /// Long-poll timeout in seconds; 0 means short polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
}

impl Request for GetUpdates {
    const METHOD: &'static str = "getUpdates";
    /// Raw entries; decode each one with `Update::from_wire`.
    type Response = Vec<Value>;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SendMessage {
    pub chat_id: Recipient,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<MessageThreadId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyParameters {
    pub message_id: MessageId,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<Recipient>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            message_thread_id: None,
            parse_mode: None,
            entities: Vec::new(),
            disable_notification: false,
            reply_parameters: None,
            reply_markup: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_parameters = Some(ReplyParameters { message_id });
        self
    }

    pub fn reply_markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }

    pub fn in_thread(mut self, thread: MessageThreadId) -> Self {
        self.message_thread_id = Some(thread);
        self
    }
}

impl Request for SendMessage {
    const METHOD: &'static str = "sendMessage";
    type Response = Message;
}

/// Either `chat_id` + `message_id` or `inline_message_id` is set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditMessageText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<InlineMessageId>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    pub fn message(
        chat_id: impl Into<Recipient>,
        message_id: MessageId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: Some(chat_id.into()),
            message_id: Some(message_id),
            inline_message_id: None,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn inline(inline_message_id: InlineMessageId, text: impl Into<String>) -> Self {
        Self {
            chat_id: None,
            message_id: None,
            inline_message_id: Some(inline_message_id),
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }
}

impl Request for EditMessageText {
    const METHOD: &'static str = "editMessageText";
    type Response = MessageOrEdit;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeleteMessage {
    pub chat_id: Recipient,
    pub message_id: MessageId,
}

impl Request for DeleteMessage {
    const METHOD: &'static str = "deleteMessage";
    type Response = bool;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: CallbackQueryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: CallbackQueryId) -> Self {
        Self {
            callback_query_id,
            text: None,
            show_alert: false,
            url: None,
            cache_time: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Request for AnswerCallbackQuery {
    const METHOD: &'static str = "answerCallbackQuery";
    type Response = bool;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerInlineQuery {
    pub inline_query_id: InlineQueryId,
    pub results: Vec<InlineQueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
}

impl Request for AnswerInlineQuery {
    const METHOD: &'static str = "answerInlineQuery";
    type Response = bool;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerWebAppQuery {
    pub web_app_query_id: WebAppQueryId,
    pub result: InlineQueryResult,
}

impl Request for AnswerWebAppQuery {
    const METHOD: &'static str = "answerWebAppQuery";
    type Response = SentWebAppMessage;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GetChatMember {
    pub chat_id: Recipient,
    pub user_id: UserId,
}

impl Request for GetChatMember {
    const METHOD: &'static str = "getChatMember";
    type Response = ChatMember;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<BotCommandScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl Request for SetMyCommands {
    const METHOD: &'static str = "setMyCommands";
    type Response = bool;
}

/// Omitting `chat_id` changes the bot's default menu button.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SetChatMenuButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_button: Option<MenuButton>,
}

impl Request for SetChatMenuButton {
    const METHOD: &'static str = "setChatMenuButton";
    type Response = bool;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetMessageReaction {
    pub chat_id: Recipient,
    pub message_id: MessageId,
    pub reaction: Vec<ReactionType>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_big: bool,
}

impl Request for SetMessageReaction {
    const METHOD: &'static str = "setMessageReaction";
    type Response = bool;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SendMediaGroup {
    pub chat_id: Recipient,
    /// 2 to 10 items.
    pub media: Vec<InputMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<MessageThreadId>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
}

impl Request for SendMediaGroup {
    const METHOD: &'static str = "sendMediaGroup";
    type Response = Vec<Message>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GetFile {
    pub file_id: FileId,
}

impl Request for GetFile {
    const METHOD: &'static str = "getFile";
    type Response = File;
}
