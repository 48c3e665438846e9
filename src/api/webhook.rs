//! Telegram webhook payloads (only the fields the bot reacts to).

use crate::domain::ChatId;
use crate::telegram::ChatInteraction;
use serde::Deserialize;

/// Header Telegram sets when the webhook was registered with a secret token.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

const LIST_COMMANDS: [&str; 2] = ["/reservations", "/my_reservations"];
const LIST_BUTTON_TEXT: &str = "Мои бронирования";
const CODE_COMMAND: &str = "/verify";

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Maps the update onto a bot interaction; `None` for updates the bot ignores.
    pub fn into_interaction(self) -> Option<ChatInteraction> {
        if let Some(query) = self.callback_query {
            // inline-mode callbacks carry no message; answer in the user's private chat
            let chat_id = query
                .message
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(ChatInteraction::ViewReservation {
                chat_id: ChatId::new(chat_id),
                callback_id: query.id,
                data: query.data.unwrap_or_default(),
            });
        }

        let message = self.message?;
        let chat_id = ChatId::new(message.chat.id);
        let text = message.text?;

        Some(if is_list_request(&text) {
            ChatInteraction::ListReservations { chat_id }
        } else if command(&text) == CODE_COMMAND {
            ChatInteraction::RequestCode { chat_id }
        } else {
            ChatInteraction::Start { chat_id }
        })
    }
}

/// Compares the webhook secret header in constant time.
pub fn secret_matches(expected: &str, provided: Option<&str>) -> bool {
    provided.is_some_and(|provided| {
        constant_time_eq::constant_time_eq(expected.as_bytes(), provided.as_bytes())
    })
}

fn is_list_request(text: &str) -> bool {
    text.trim().ends_with(LIST_BUTTON_TEXT) || LIST_COMMANDS.contains(&command(text))
}

/// First word without the bot mention ("/reservations@QuietGrooveBot" in group chats).
fn command(text: &str) -> &str {
    text.split_whitespace()
        .next()
        .and_then(|word| word.split('@').next())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Option<ChatInteraction> {
        serde_json::from_value::<Update>(value)
            .unwrap()
            .into_interaction()
    }

    #[test]
    fn test_list_command() {
        let interaction = parse(json!({
            "update_id": 1,
            "message": { "message_id": 5, "chat": { "id": 42, "type": "private" }, "text": "/reservations" }
        }));
        assert_eq!(
            interaction,
            Some(ChatInteraction::ListReservations {
                chat_id: ChatId::new(42)
            })
        );
    }

    #[test]
    fn test_list_command_with_bot_mention_and_button_text() {
        assert!(is_list_request("/my_reservations@QuietGrooveBot"));
        assert!(is_list_request("📋 Мои бронирования"));
        assert!(!is_list_request("/start"));
        assert!(!is_list_request("hello"));
    }

    #[test]
    fn test_other_text_gets_greeting() {
        let interaction = parse(json!({
            "update_id": 2,
            "message": { "chat": { "id": 42 }, "text": "/start" }
        }));
        assert_eq!(
            interaction,
            Some(ChatInteraction::Start {
                chat_id: ChatId::new(42)
            })
        );
    }

    #[test]
    fn test_verify_command_requests_code() {
        for text in ["/verify", "/verify@QuietGrooveBot"] {
            let interaction = parse(json!({
                "update_id": 7,
                "message": { "chat": { "id": 42 }, "text": text }
            }));
            assert_eq!(
                interaction,
                Some(ChatInteraction::RequestCode {
                    chat_id: ChatId::new(42)
                })
            );
        }
    }

    #[test]
    fn test_callback_query() {
        let interaction = parse(json!({
            "update_id": 3,
            "callback_query": {
                "id": "cb-1",
                "from": { "id": 7 },
                "message": { "chat": { "id": 42 } },
                "data": "view_resv_abc"
            }
        }));
        assert_eq!(
            interaction,
            Some(ChatInteraction::ViewReservation {
                chat_id: ChatId::new(42),
                callback_id: "cb-1".to_string(),
                data: "view_resv_abc".to_string(),
            })
        );
    }

    #[test]
    fn test_callback_without_message_uses_sender() {
        let interaction = parse(json!({
            "update_id": 4,
            "callback_query": { "id": "cb-2", "from": { "id": 7 } }
        }));
        assert_eq!(
            interaction,
            Some(ChatInteraction::ViewReservation {
                chat_id: ChatId::new(7),
                callback_id: "cb-2".to_string(),
                data: String::new(),
            })
        );
    }

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches("s3cret", Some("s3cret")));
        assert!(!secret_matches("s3cret", Some("s3creT")));
        assert!(!secret_matches("s3cret", Some("s3cret ")));
        assert!(!secret_matches("s3cret", Some("")));
        assert!(!secret_matches("s3cret", None));
    }

    #[test]
    fn test_ignored_updates() {
        assert_eq!(parse(json!({ "update_id": 5 })), None);
        assert_eq!(
            parse(json!({ "update_id": 6, "message": { "chat": { "id": 1 } } })),
            None
        );
    }
}
