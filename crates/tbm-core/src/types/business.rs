use serde::{Deserialize, Serialize};

use super::chat::{Chat, User};
use crate::{
    decode::wire_record,
    ids::{BusinessConnectionId, ChatId, MessageId, UnixTimestamp},
};

/// The bot was connected to or disconnected from a business account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessConnection {
    pub id: BusinessConnectionId,
    pub user: User,
    pub user_chat_id: ChatId,
    pub date: UnixTimestamp,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub can_reply: bool,
    pub is_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessMessagesDeleted {
    pub business_connection_id: BusinessConnectionId,
    pub chat: Chat,
    pub message_ids: Vec<MessageId>,
}

wire_record!(BusinessConnection, BusinessMessagesDeleted);
