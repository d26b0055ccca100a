//! Persistent chat history and favorites per session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use docqa_core::{Error, QueryType, Result};
use docqa_quality::GateState;
use docqa_rag::SourceSummary;

use crate::QaResponse;

const FAVORITE_TITLE_CHARS: usize = 100;
pub const DEFAULT_CONTEXT_MESSAGES: usize = 5;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What was known about an answer when it was recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerMetadata {
    pub source_documents: Vec<SourceSummary>,
    /// Retrieval confidence of the answer
    pub confidence_score: f64,
    pub document_count: usize,
    pub query_type: QueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_state: Option<GateState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnswerMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub title: String,
    /// Question that led to the answer, empty when unknown
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    pub added_to_favorites: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatStatistics {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub favorites_count: usize,
    pub first_message_date: Option<DateTime<Utc>>,
    pub last_message_date: Option<DateTime<Utc>>,
}

/// Chat history of one session, saved as JSON after every change
pub struct ChatHistory {
    session_id: String,
    chat_file: PathBuf,
    favorites_file: PathBuf,
    messages: Vec<ChatMessage>,
    favorites: Vec<Favorite>,
}

impl ChatHistory {
    /// Open the history of `session_id` stored under `dir`, creating the
    /// directory if needed.
    pub fn open(dir: impl AsRef<Path>, session_id: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let chat_file = dir.join(format!("chat_history_{}.json", session_id));
        let favorites_file = dir.join(format!("favorites_{}.json", session_id));
        let messages: Vec<ChatMessage> = load(&chat_file)?;
        let favorites: Vec<Favorite> = load(&favorites_file)?;

        info!(
            session = session_id,
            messages = messages.len(),
            favorites = favorites.len(),
            "chat history loaded"
        );

        Ok(Self {
            session_id: session_id.to_string(),
            chat_file,
            favorites_file,
            messages,
            favorites,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Append a message and save
    pub fn add_message(
        &mut self,
        role: Role,
        content: &str,
        metadata: Option<AnswerMetadata>,
    ) -> Result<&ChatMessage> {
        let timestamp = Utc::now();
        let message = ChatMessage {
            id: format!("{}_{}", timestamp.timestamp_micros(), self.messages.len()),
            role,
            content: content.to_string(),
            timestamp,
            metadata,
        };

        self.messages.push(message);
        save(&self.chat_file, &self.messages)?;
        debug!(?role, "message added to chat history");

        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Record a question and the delivered answer with its metadata.
    /// Returns the assistant message.
    pub fn add_qa_pair(&mut self, response: &QaResponse) -> Result<&ChatMessage> {
        self.add_message(Role::User, &response.question, None)?;

        let metadata = AnswerMetadata {
            source_documents: response.sources.clone(),
            confidence_score: response.retrieval_confidence,
            document_count: response.sources.len(),
            query_type: response.analysis.query_type,
            quality_score: response.metrics.as_ref().map(|m| m.overall),
            gate_state: response.gate_state,
        };
        self.add_message(Role::Assistant, &response.answer, Some(metadata))
    }

    /// All messages, or only the last `limit`
    pub fn messages(&self, limit: Option<usize>) -> &[ChatMessage] {
        match limit {
            Some(limit) if limit > 0 => &self.messages[self.messages.len().saturating_sub(limit)..],
            _ => &self.messages,
        }
    }

    /// Last `limit` messages as "Human:"/"Assistant:" turns
    pub fn conversation_context(&self, limit: usize) -> String {
        let start = self.messages.len().saturating_sub(limit);
        self.messages[start..]
            .iter()
            .map(|message| {
                let speaker = match message.role {
                    Role::User => "Human",
                    Role::Assistant => "Assistant",
                };
                format!("{}: {}", speaker, message.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Drop every message; favorites are kept
    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        save(&self.chat_file, &self.messages)?;
        info!(session = %self.session_id, "chat history cleared");
        Ok(())
    }

    /// Mark a message as favorite. Returns `false` for an unknown id or one
    /// that is already a favorite.
    pub fn add_favorite(&mut self, message_id: &str, title: Option<&str>) -> Result<bool> {
        let Some(index) = self.messages.iter().position(|m| m.id == message_id) else {
            return Ok(false);
        };
        if self.favorites.iter().any(|f| f.id == message_id) {
            return Ok(false);
        }

        let message = &self.messages[index];
        let question = match (message.role, index.checked_sub(1)) {
            (Role::Assistant, Some(prev)) if self.messages[prev].role == Role::User => {
                self.messages[prev].content.clone()
            }
            _ => String::new(),
        };
        let title = match title {
            Some(title) => title.to_string(),
            None => {
                let preview: String = message.content.chars().take(FAVORITE_TITLE_CHARS).collect();
                format!("{}...", preview)
            }
        };

        self.favorites.push(Favorite {
            id: message.id.clone(),
            title,
            question,
            answer: message.content.clone(),
            timestamp: message.timestamp,
            added_to_favorites: Utc::now(),
        });
        save(&self.favorites_file, &self.favorites)?;
        info!(message_id, "added to favorites");
        Ok(true)
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Returns whether a favorite was removed
    pub fn remove_favorite(&mut self, message_id: &str) -> Result<bool> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != message_id);
        if self.favorites.len() == before {
            return Ok(false);
        }
        save(&self.favorites_file, &self.favorites)?;
        Ok(true)
    }

    pub fn statistics(&self) -> ChatStatistics {
        let count = |role: Role| self.messages.iter().filter(|m| m.role == role).count();

        ChatStatistics {
            total_messages: self.messages.len(),
            user_messages: count(Role::User),
            assistant_messages: count(Role::Assistant),
            favorites_count: self.favorites.len(),
            first_message_date: self.messages.first().map(|m| m.timestamp),
            last_message_date: self.messages.last().map(|m| m.timestamp),
        }
    }

    /// Case-insensitive substring search; the most recent `limit` matches in
    /// chronological order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&ChatMessage> {
        let query_lower = query.to_lowercase();
        let matches: Vec<&ChatMessage> = self
            .messages
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&query_lower))
            .collect();

        let start = matches.len().saturating_sub(limit);
        matches[start..].to_vec()
    }
}

fn load<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))
}

fn save<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn history(dir: &TempDir) -> ChatHistory {
        ChatHistory::open(dir.path(), "test").unwrap()
    }

    #[test]
    fn test_messages_persist_across_sessions() {
        let dir = TempDir::new().unwrap();
        {
            let mut chat = history(&dir);
            chat.add_message(Role::User, "What is Rust?", None).unwrap();
            chat.add_message(Role::Assistant, "A systems language.", None)
                .unwrap();
        }

        let chat = history(&dir);
        assert_eq!(chat.messages(None).len(), 2);
        assert_eq!(chat.messages(Some(1))[0].content, "A systems language.");
        assert!(dir.path().join("chat_history_test.json").exists());

        let other = ChatHistory::open(dir.path(), "other").unwrap();
        assert!(other.messages(None).is_empty());
    }

    #[test]
    fn test_conversation_context() {
        let dir = TempDir::new().unwrap();
        let mut chat = history(&dir);
        for (role, text) in [
            (Role::User, "one"),
            (Role::Assistant, "two"),
            (Role::User, "three"),
        ] {
            chat.add_message(role, text, None).unwrap();
        }

        assert_eq!(chat.conversation_context(2), "Assistant: two\n\nHuman: three");
        assert_eq!(chat.conversation_context(0), "");
    }

    #[test]
    fn test_favorites_pick_up_the_question() {
        let dir = TempDir::new().unwrap();
        let mut chat = history(&dir);
        chat.add_message(Role::User, "What is Cargo?", None).unwrap();
        let answer_id = chat
            .add_message(Role::Assistant, "The Rust package manager.", None)
            .unwrap()
            .id
            .clone();

        assert!(chat.add_favorite(&answer_id, None).unwrap());
        assert!(!chat.add_favorite(&answer_id, None).unwrap());
        assert!(!chat.add_favorite("missing", None).unwrap());

        let favorite = &chat.favorites()[0];
        assert_eq!(favorite.question, "What is Cargo?");
        assert_eq!(favorite.title, "The Rust package manager....");

        let reopened = history(&dir);
        assert_eq!(reopened.favorites().len(), 1);

        assert!(chat.remove_favorite(&answer_id).unwrap());
        assert!(!chat.remove_favorite(&answer_id).unwrap());
    }

    #[test]
    fn test_search_returns_latest_matches() {
        let dir = TempDir::new().unwrap();
        let mut chat = history(&dir);
        for text in ["Rust one", "Python", "rust two", "RUST three"] {
            chat.add_message(Role::User, text, None).unwrap();
        }

        let hits: Vec<_> = chat.search("rust", 2).iter().map(|m| m.content.as_str()).collect();
        assert_eq!(hits, vec!["rust two", "RUST three"]);
        assert!(chat.search("go", 10).is_empty());
    }

    #[test]
    fn test_statistics_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut chat = history(&dir);
        assert_eq!(chat.statistics(), ChatStatistics::default());

        chat.add_message(Role::User, "q", None).unwrap();
        chat.add_message(Role::Assistant, "a", None).unwrap();
        let stats = chat.statistics();
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.user_messages, 1);
        assert_eq!(stats.assistant_messages, 1);
        assert!(stats.first_message_date <= stats.last_message_date);

        chat.clear().unwrap();
        assert_eq!(history(&dir).statistics().total_messages, 0);
    }

    #[test]
    fn test_corrupt_history_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("chat_history_test.json"), "not json").unwrap();
        let err = ChatHistory::open(dir.path(), "test").err().unwrap();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
