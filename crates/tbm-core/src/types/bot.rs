use serde::{Deserialize, Serialize};

use super::markup::WebAppInfo;
use crate::{
    decode::{tagged_union, wire_record},
    ids::{ChatId, UserId},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

tagged_union! {
    /// Which users a command list applies to.
    pub enum BotCommandScope in "type" {
        "default" => Default,
        "all_private_chats" => AllPrivateChats,
        "all_group_chats" => AllGroupChats,
        "all_chat_administrators" => AllChatAdministrators,
        "chat" => Chat(ScopeChat),
        "chat_administrators" => ChatAdministrators(ScopeChat),
        "chat_member" => ChatMember(ScopeChatMember),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChat {
    pub chat_id: ChatId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChatMember {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

tagged_union! {
    pub enum MenuButton in "type" {
        "commands" => Commands,
        "web_app" => WebApp(MenuButtonWebApp),
        "default" => Default,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuButtonWebApp {
    pub text: String,
    pub web_app: WebAppInfo,
}

wire_record!(BotCommand);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{assert_round_trips, FromWire};

    #[test]
    fn scopes_share_payload_types_but_not_tags() {
        let scope = BotCommandScope::ChatAdministrators(ScopeChat {
            chat_id: ChatId::new(-100),
        });
        assert_eq!(
            serde_json::to_value(&scope).unwrap(),
            json!({"type": "chat_administrators", "chat_id": -100})
        );
        assert_eq!(
            serde_json::to_value(BotCommandScope::Default).unwrap(),
            json!({"type": "default"})
        );
        let back = BotCommandScope::from_wire(json!({"type": "chat_member", "chat_id": 1, "user_id": 2}))
            .unwrap();
        assert_eq!(
            back,
            BotCommandScope::ChatMember(ScopeChatMember {
                chat_id: ChatId::new(1),
                user_id: UserId::new(2),
            })
        );
    }

    #[test]
    fn menu_button_web_app() {
        let raw = json!({"type": "web_app", "text": "Open", "web_app": {"url": "https://app.test"}});
        let button = MenuButton::from_wire(raw.clone()).unwrap();
        assert_eq!(button.variant_name(), "WebApp");
        assert_eq!(serde_json::to_value(&button).unwrap(), raw);
    }

    #[test]
    fn every_scope_and_menu_button_round_trips() {
        assert_round_trips(
            BotCommandScope::table(),
            vec![
                json!({"type": "default"}),
                json!({"type": "all_private_chats"}),
                json!({"type": "all_group_chats"}),
                json!({"type": "all_chat_administrators"}),
                json!({"type": "chat", "chat_id": -100}),
                json!({"type": "chat_administrators", "chat_id": -100}),
                json!({"type": "chat_member", "chat_id": -100, "user_id": 7}),
            ],
        );
        assert_round_trips(
            MenuButton::table(),
            vec![
                json!({"type": "commands"}),
                json!({"type": "web_app", "text": "Open", "web_app": {"url": "https://x/app"}}),
                json!({"type": "default"}),
            ],
        );
    }
}
