use serde::{Deserialize, Serialize};

use super::chat::{Chat, User};
use crate::{
    decode::{tagged_union, wire_record},
    ids::{ChatId, UnixTimestamp},
};

tagged_union! {
    /// A user's membership in a chat, discriminated by `status`.
    pub enum ChatMember in "status" {
        "creator" => Owner(ChatMemberOwner),
        "administrator" => Administrator(ChatMemberAdministrator),
        "member" => Member(ChatMemberMember),
        "restricted" => Restricted(ChatMemberRestricted),
        "left" => Left(ChatMemberLeft),
        "kicked" => Banned(ChatMemberBanned),
    }
}

impl ChatMember {
    pub fn user(&self) -> &User {
        match self {
            ChatMember::Owner(m) => &m.user,
            ChatMember::Administrator(m) => &m.user,
            ChatMember::Member(m) => &m.user,
            ChatMember::Restricted(m) => &m.user,
            ChatMember::Left(m) => &m.user,
            ChatMember::Banned(m) => &m.user,
        }
    }

    /// Whether the user is currently in the chat.
    pub fn is_present(&self) -> bool {
        match self {
            ChatMember::Owner(_) | ChatMember::Administrator(_) | ChatMember::Member(_) => true,
            ChatMember::Restricted(m) => m.is_member,
            ChatMember::Left(_) | ChatMember::Banned(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberOwner {
    pub user: User,
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberAdministrator {
    pub user: User,
    pub can_be_edited: bool,
    pub is_anonymous: bool,
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub can_pin_messages: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberMember {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_date: Option<UnixTimestamp>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberRestricted {
    pub user: User,
    pub is_member: bool,
    pub can_send_messages: bool,
    pub can_send_photos: bool,
    pub can_send_polls: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
    /// 0 means restricted forever.
    pub until_date: UnixTimestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberLeft {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberBanned {
    pub user: User,
    /// 0 means banned forever.
    pub until_date: UnixTimestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: UnixTimestamp,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<ChatInviteLink>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub via_join_request: bool,
}

impl ChatMemberUpdated {
    /// True when the user was outside the chat before and is inside now.
    pub fn joined(&self) -> bool {
        !self.old_chat_member.is_present() && self.new_chat_member.is_present()
    }

    pub fn left(&self) -> bool {
        self.old_chat_member.is_present() && !self.new_chat_member.is_present()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatJoinRequest {
    pub chat: Chat,
    pub from: User,
    /// Private chat with the requester, usable for 5 minutes.
    pub user_chat_id: ChatId,
    pub date: UnixTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<ChatInviteLink>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatInviteLink {
    pub invite_link: String,
    pub creator: User,
    pub creates_join_request: bool,
    pub is_primary: bool,
    pub is_revoked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<UnixTimestamp>,
}

wire_record!(ChatMemberUpdated, ChatJoinRequest, ChatInviteLink);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{DecodeError, FromWire};
    use crate::ids::UserId;

    fn user() -> User {
        User {
            id: UserId::new(7),
            is_bot: false,
            first_name: "Kim".to_string(),
            last_name: None,
            username: Some("kim".to_string()),
            language_code: None,
            is_premium: false,
        }
    }

    #[test]
    fn status_selects_variant() {
        let raw = json!({
            "status": "kicked",
            "user": {"id": 7, "is_bot": false, "first_name": "Kim", "username": "kim"},
            "until_date": 0
        });
        let member = ChatMember::from_wire(raw).unwrap();
        assert_eq!(member.variant_name(), "Banned");
        assert_eq!(member.user().id, UserId::new(7));
        assert!(!member.is_present());
    }

    #[test]
    fn every_status_round_trips() {
        let variants = vec![
            ChatMember::Owner(ChatMemberOwner {
                user: user(),
                is_anonymous: false,
                custom_title: Some("boss".to_string()),
            }),
            ChatMember::Administrator(ChatMemberAdministrator {
                user: user(),
                can_be_edited: true,
                is_anonymous: false,
                can_manage_chat: true,
                can_delete_messages: true,
                can_restrict_members: false,
                can_promote_members: false,
                can_change_info: true,
                can_invite_users: true,
                can_pin_messages: true,
                custom_title: None,
            }),
            ChatMember::Member(ChatMemberMember {
                user: user(),
                until_date: None,
            }),
            ChatMember::Restricted(ChatMemberRestricted {
                user: user(),
                is_member: true,
                can_send_messages: false,
                can_send_photos: false,
                can_send_polls: false,
                can_invite_users: false,
                can_pin_messages: false,
                until_date: UnixTimestamp::new(1_800_000_000),
            }),
            ChatMember::Left(ChatMemberLeft { user: user() }),
            ChatMember::Banned(ChatMemberBanned {
                user: user(),
                until_date: UnixTimestamp::new(0),
            }),
        ];

        assert_eq!(
            ChatMember::table().discriminators(),
            vec!["administrator", "creator", "kicked", "left", "member", "restricted"]
        );

        for v in variants {
            let encoded = serde_json::to_value(&v).unwrap();
            assert_eq!(encoded["status"], v.discriminator());
            assert_eq!(ChatMember::from_wire(encoded).unwrap(), v);
        }
    }

    #[test]
    fn missing_required_field_names_variant_and_field() {
        let raw = json!({
            "status": "kicked",
            "user": {"id": 7, "is_bot": false, "first_name": "Kim"}
        });
        let err = ChatMember::from_wire(raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                variant: "Banned",
                field: Some("until_date".to_string()),
                detail: "missing field `until_date`".to_string(),
            }
        );
        assert!(!err.is_protocol_skew());
    }

    #[test]
    fn join_and_leave_transitions() {
        let update = ChatMemberUpdated {
            chat: Chat {
                id: ChatId::new(-100),
                kind: super::super::chat::ChatKind::Supergroup,
                title: Some("g".to_string()),
                username: None,
                first_name: None,
                last_name: None,
                is_forum: false,
            },
            from: user(),
            date: UnixTimestamp::new(1),
            old_chat_member: ChatMember::Left(ChatMemberLeft { user: user() }),
            new_chat_member: ChatMember::Member(ChatMemberMember {
                user: user(),
                until_date: None,
            }),
            invite_link: None,
            via_join_request: false,
        };
        assert!(update.joined());
        assert!(!update.left());
    }
}
