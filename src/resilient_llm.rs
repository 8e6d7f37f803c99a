#[path = "resilient_llm/config.rs"]
mod config;

#[path = "resilient_llm/sleeper.rs"]
mod sleeper;

#[path = "resilient_llm/wrapper.rs"]
mod wrapper;

#[path = "resilient_llm/chat.rs"]
mod chat;

pub use config::ResilienceConfig;
#[cfg(test)]
pub(crate) use sleeper::RecordingSleeper;
pub use sleeper::{Sleeper, TokioSleeper};
pub use wrapper::ResilientLLM;
