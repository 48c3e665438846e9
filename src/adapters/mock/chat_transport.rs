use crate::domain::ChatId;
use crate::ports::chat_transport::{
    CallbackAnswer, ChatTransport as ChatTransportTrait, OutboundMessage, OutboundPhoto,
    TransportError,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// 送信の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message(OutboundMessage),
    Photo(OutboundPhoto),
    CallbackAnswer(CallbackAnswer),
}

/// Mock implementation of ChatTransport
///
/// Records every attempt instead of talking to Telegram.
/// Individual chats can be marked as unreachable, photos can be made to fail,
/// and a delay can be injected to exercise timeouts.
#[derive(Default)]
pub struct ChatTransport {
    attempts: Mutex<Vec<ChatId>>,
    sent: Mutex<Vec<Sent>>,
    unreachable: Mutex<HashSet<ChatId>>,
    reject_photos: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
}

impl ChatTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to this chat fail from now on
    pub fn mark_unreachable(&self, chat_id: ChatId) {
        self.unreachable.lock().unwrap().insert(chat_id);
    }

    pub fn reject_photos(&self) {
        *self.reject_photos.lock().unwrap() = true;
    }

    /// Every call sleeps this long before completing
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Chats a message or photo was attempted to, in order, including failures
    pub fn attempted_chats(&self) -> Vec<ChatId> {
        self.attempts.lock().unwrap().clone()
    }

    /// Successfully delivered items, in order
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn photos(&self) -> Vec<OutboundPhoto> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Photo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn answers(&self) -> Vec<CallbackAnswer> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::CallbackAnswer(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn deliver_to(&self, chat_id: ChatId, item: Sent) -> Result<(), TransportError> {
        self.attempts.lock().unwrap().push(chat_id);
        if self.unreachable.lock().unwrap().contains(&chat_id) {
            return Err(TransportError::Rejected {
                description: format!("Forbidden: bot was blocked by the user {chat_id}"),
            });
        }
        self.sent.lock().unwrap().push(item);
        Ok(())
    }
}

#[async_trait]
impl ChatTransportTrait for ChatTransport {
    async fn send_message(&self, message: OutboundMessage) -> Result<(), TransportError> {
        self.pause().await;
        self.deliver_to(message.chat_id, Sent::Message(message))
    }

    async fn send_photo(&self, photo: OutboundPhoto) -> Result<(), TransportError> {
        self.pause().await;
        if *self.reject_photos.lock().unwrap() {
            self.attempts.lock().unwrap().push(photo.chat_id);
            return Err(TransportError::Rejected {
                description: "Bad Request: wrong file identifier/HTTP URL specified".to_string(),
            });
        }
        self.deliver_to(photo.chat_id, Sent::Photo(photo))
    }

    async fn answer_callback(&self, answer: CallbackAnswer) -> Result<(), TransportError> {
        self.pause().await;
        self.sent.lock().unwrap().push(Sent::CallbackAnswer(answer));
        Ok(())
    }
}
