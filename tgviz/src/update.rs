//! Telegram update payloads and event-type classification
//!
//! An update is an opaque JSON object as delivered by the Bot API
//! webhook or long poller. No schema is enforced beyond inspecting the
//! known top-level keys, so the middleware works with any bot library
//! that can hand over the raw update.

use serde_json::Value;

/// One Telegram update: a mapping of top-level keys to arbitrary JSON.
///
/// Caller-owned; the crate never mutates it.
pub type Update = serde_json::Map<String, Value>;

/// Telegram update kinds, in Bot API wire order.
///
/// `Undefined` is the sentinel for updates that carry none of the known
/// keys (or only falsy values under them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    BusinessConnection,
    BusinessMessage,
    EditedBusinessMessage,
    DeletedBusinessMessages,
    MessageReaction,
    MessageReactionCount,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    ChatBoost,
    RemovedChatBoost,
    PurchasedPaidMedia,
    Undefined,
}

/// Known update keys in classification order. First truthy match wins.
const EVENT_KEYS: [(&str, EventType); 23] = [
    ("message", EventType::Message),
    ("edited_message", EventType::EditedMessage),
    ("channel_post", EventType::ChannelPost),
    ("edited_channel_post", EventType::EditedChannelPost),
    ("business_connection", EventType::BusinessConnection),
    ("business_message", EventType::BusinessMessage),
    ("edited_business_message", EventType::EditedBusinessMessage),
    ("deleted_business_messages", EventType::DeletedBusinessMessages),
    ("message_reaction", EventType::MessageReaction),
    ("message_reaction_count", EventType::MessageReactionCount),
    ("inline_query", EventType::InlineQuery),
    ("chosen_inline_result", EventType::ChosenInlineResult),
    ("callback_query", EventType::CallbackQuery),
    ("shipping_query", EventType::ShippingQuery),
    ("pre_checkout_query", EventType::PreCheckoutQuery),
    ("poll", EventType::Poll),
    ("poll_answer", EventType::PollAnswer),
    ("my_chat_member", EventType::MyChatMember),
    ("chat_member", EventType::ChatMember),
    ("chat_join_request", EventType::ChatJoinRequest),
    ("chat_boost", EventType::ChatBoost),
    ("removed_chat_boost", EventType::RemovedChatBoost),
    ("purchased_paid_media", EventType::PurchasedPaidMedia),
];

impl EventType {
    /// Classify an update by scanning the known keys in wire order.
    ///
    /// The first key present with a truthy value decides the type;
    /// an update with no truthy known key is [`EventType::Undefined`].
    pub fn classify(update: &Update) -> EventType {
        for (key, event_type) in EVENT_KEYS {
            if update.get(key).is_some_and(is_truthy) {
                return event_type;
            }
        }
        EventType::Undefined
    }

    /// Wire name of this event type, e.g. `"callback_query"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Message => "message",
            EventType::EditedMessage => "edited_message",
            EventType::ChannelPost => "channel_post",
            EventType::EditedChannelPost => "edited_channel_post",
            EventType::BusinessConnection => "business_connection",
            EventType::BusinessMessage => "business_message",
            EventType::EditedBusinessMessage => "edited_business_message",
            EventType::DeletedBusinessMessages => "deleted_business_messages",
            EventType::MessageReaction => "message_reaction",
            EventType::MessageReactionCount => "message_reaction_count",
            EventType::InlineQuery => "inline_query",
            EventType::ChosenInlineResult => "chosen_inline_result",
            EventType::CallbackQuery => "callback_query",
            EventType::ShippingQuery => "shipping_query",
            EventType::PreCheckoutQuery => "pre_checkout_query",
            EventType::Poll => "poll",
            EventType::PollAnswer => "poll_answer",
            EventType::MyChatMember => "my_chat_member",
            EventType::ChatMember => "chat_member",
            EventType::ChatJoinRequest => "chat_join_request",
            EventType::ChatBoost => "chat_boost",
            EventType::RemovedChatBoost => "removed_chat_boost",
            EventType::PurchasedPaidMedia => "purchased_paid_media",
            EventType::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON truthiness: null, false, zero, and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
