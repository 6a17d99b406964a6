//! Generation-service integration.
//!
//! Provides an OpenAI-compatible client for the remote chat-completion
//! service and the prompt text used for dialogue turns and evaluation.

mod client;
mod prompts;

pub use client::{ChatService, LlmClient, Message, Role};
pub use prompts::Prompts;

#[cfg(test)]
pub(crate) mod testing {
    use super::{ChatService, Message};
    use crate::error::{MiPracticeError, Result};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted generation service for orchestrator tests.
    ///
    /// Pops one canned outcome per call and records every message list it
    /// was sent.
    pub struct ScriptedChat {
        replies: Mutex<VecDeque<std::result::Result<String, String>>>,
        sent: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedChat {
        pub fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                sent: Mutex::new(Vec::new()),
            }
        }

        /// Message lists sent so far, in call order.
        pub fn sent(&self) -> Vec<Vec<Message>> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatService for ScriptedChat {
        async fn reply(&self, messages: Vec<Message>) -> Result<String> {
            self.sent.lock().unwrap().push(messages);
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(MiPracticeError::ChatApi(message)),
                None => Err(MiPracticeError::ChatApi("no scripted reply left".to_string())),
            }
        }
    }
}
