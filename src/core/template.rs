use crate::utils::error::Result;
use std::fs;
use std::path::Path;

const NAME_TOKEN: &str = "${name}";
const PREVIEW_LIMIT: usize = 100;

/// Message template loaded once from disk. Holds zero or more `${name}`
/// tokens; no other placeholders, no escaping.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    body: String,
}

impl MessageTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_body(&raw))
    }

    pub fn from_body(body: &str) -> Self {
        Self {
            body: body.trim().to_string(),
        }
    }

    /// Replaces every occurrence of the `${name}` token with the contact
    /// name. A template without the token comes back unchanged.
    pub fn render(&self, name: &str) -> String {
        self.body.replace(NAME_TOKEN, name)
    }

    /// Truncated body for the startup banner.
    pub fn preview(&self) -> String {
        let mut chars = self.body.chars();
        let head: String = chars.by_ref().take(PREVIEW_LIMIT).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
