use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion call: the conversation plus sampling options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the service to constrain its output to a JSON object.
    pub json_output: bool,
}

impl ChatPrompt {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            messages: Vec::new(),
            temperature,
            max_tokens,
            json_output: false,
        }
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(Message::system(content));
    }
}
