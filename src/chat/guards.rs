use crate::{
    chat::{ChatMessage, ChatRole},
    error::LLMError,
};

pub(crate) fn ensure_has_user_turn(
    messages: &[ChatMessage],
    error_message: &str,
) -> Result<(), LLMError> {
    if !messages.iter().any(|m| m.role == ChatRole::User) {
        return Err(LLMError::InvalidRequest(error_message.to_string()));
    }
    Ok(())
}
