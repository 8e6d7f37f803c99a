//! Concrete [`ChatProvider`](crate::chat::ChatProvider) implementations.

pub mod openai;
