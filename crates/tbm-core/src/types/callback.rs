use serde::{Deserialize, Serialize};

use super::{chat::User, message::Message};
use crate::{
    decode::wire_record,
    ids::{CallbackQueryId, InlineMessageId},
};

/// Press of an inline keyboard button carrying `callback_data` or a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: CallbackQueryId,
    pub from: User,
    /// Absent when the button was attached to an inline-mode message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<InlineMessageId>,
    pub chat_instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

wire_record!(CallbackQuery);
