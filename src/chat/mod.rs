mod guards;
mod message;
mod structured;
mod traits;
mod usage;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use structured::StructuredOutputFormat;
pub use traits::{ChatProvider, ChatResponse};
pub use usage::Usage;

pub(crate) use guards::ensure_has_user_turn;
