use serde::{Deserialize, Serialize};

use super::{
    chat::{Chat, User},
    message::MessageEntity,
};
use crate::{
    decode::wire_record,
    ids::{PollId, Seconds, UnixTimestamp},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollKind {
    Regular,
    Quiz,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub voter_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<PollOption>,
    pub total_voter_count: u32,
    pub is_closed: bool,
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: PollKind,
    pub allows_multiple_answers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explanation_entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_period: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<UnixTimestamp>,
}

impl Poll {
    /// Option with the most votes; ties resolve to the earliest option.
    pub fn leading_option(&self) -> Option<&PollOption> {
        self.options
            .iter()
            .rev()
            .max_by_key(|o| o.voter_count)
    }
}

/// A vote in a non-anonymous poll. Exactly one of `voter_chat` / `user` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: PollId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_chat: Option<Chat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Empty when the vote was retracted.
    pub option_ids: Vec<u32>,
}

impl PollAnswer {
    pub fn is_retraction(&self) -> bool {
        self.option_ids.is_empty()
    }
}

wire_record!(Poll, PollAnswer);
