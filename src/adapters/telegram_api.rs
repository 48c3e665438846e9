use crate::ports::chat_transport::{
    CallbackAnswer, ChatTransport, InlineButton, OutboundMessage, OutboundPhoto, TransportError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE_URL: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "Markdown";

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: &'a [Vec<InlineButton>],
}

#[derive(Debug, Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

impl<'a> From<&'a OutboundMessage> for SendMessageParams<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            chat_id: message.chat_id.value(),
            text: &message.text,
            parse_mode: PARSE_MODE,
            reply_markup: (!message.keyboard.is_empty()).then_some(InlineKeyboardMarkup {
                inline_keyboard: &message.keyboard,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendPhotoParams<'a> {
    chat_id: i64,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryParams<'a> {
    callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    show_alert: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API クライアント
///
/// `reqwest::Client` を内部に持ち、複数タスクから共有できる。
/// エラーにはトークンを含むURLを載せない。
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str, timeout: Duration) -> Result<Self, TransportError> {
        Self::with_api_url(API_BASE_URL, token, timeout)
    }

    /// APIのURLを差し替える（ローカルのBot APIサーバーなど）
    pub fn with_api_url(api_url: &str, token: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(Box::new(e)))?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<P: Serialize + Sync>(&self, method: &str, params: &P) -> Result<(), TransportError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(params)
            .send()
            .await
            .map_err(request_error)?;

        let body: ApiResponse = response.json().await.map_err(request_error)?;

        if body.ok {
            Ok(())
        } else {
            Err(TransportError::Rejected {
                description: body.description.unwrap_or_default(),
            })
        }
    }
}

fn request_error(e: reqwest::Error) -> TransportError {
    TransportError::Request(Box::new(e.without_url()))
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(&self, message: OutboundMessage) -> Result<(), TransportError> {
        self.call("sendMessage", &SendMessageParams::from(&message))
            .await
    }

    async fn send_photo(&self, photo: OutboundPhoto) -> Result<(), TransportError> {
        let params = SendPhotoParams {
            chat_id: photo.chat_id.value(),
            photo: &photo.photo,
            caption: &photo.caption,
            parse_mode: PARSE_MODE,
        };
        self.call("sendPhoto", &params).await
    }

    async fn answer_callback(&self, answer: CallbackAnswer) -> Result<(), TransportError> {
        let params = AnswerCallbackQueryParams {
            callback_query_id: &answer.callback_id,
            text: answer.text.as_deref(),
            show_alert: answer.show_alert,
        };
        self.call("answerCallbackQuery", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatId;
    use serde_json::json;

    #[test]
    fn test_send_message_params_without_keyboard() {
        let message = OutboundMessage::text(ChatId::new(42), "hello");
        let value = serde_json::to_value(SendMessageParams::from(&message)).unwrap();

        assert_eq!(
            value,
            json!({ "chat_id": 42, "text": "hello", "parse_mode": "Markdown" })
        );
    }

    #[test]
    fn test_send_message_params_with_inline_keyboard() {
        let message = OutboundMessage::text(ChatId::new(42), "list").with_keyboard(vec![vec![
            InlineButton {
                text: "a".to_string(),
                callback_data: "view_resv_x".to_string(),
            },
        ]]);
        let value = serde_json::to_value(SendMessageParams::from(&message)).unwrap();

        assert_eq!(
            value["reply_markup"],
            json!({ "inline_keyboard": [[{ "text": "a", "callback_data": "view_resv_x" }]] })
        );
    }

    #[test]
    fn test_answer_callback_params() {
        let params = AnswerCallbackQueryParams {
            callback_query_id: "77",
            text: Some("nope"),
            show_alert: true,
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({ "callback_query_id": "77", "text": "nope", "show_alert": true })
        );
    }

    #[test]
    fn test_api_response_error_description() {
        let body: ApiResponse =
            serde_json::from_str(r#"{"ok":false,"error_code":403,"description":"Forbidden"}"#)
                .unwrap();
        assert!(!body.ok);
        assert_eq!(body.description.as_deref(), Some("Forbidden"));
    }
}
