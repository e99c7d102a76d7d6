//! Presentation state
//!
//! Tracks the current slide, the conversation transcript, and content
//! injected into slides. Shared between the daemon and the slide tools.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{Error, Result};

/// Navigation direction for slide moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Advance one slide, clamped at the last
    Next,
    /// Go back one slide, clamped at the first
    Prev,
    /// Jump to an explicit index
    Jump,
}

impl FromStr for NavDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "jump" => Ok(Self::Jump),
            other => Err(Error::Deck(format!("invalid direction: {other}"))),
        }
    }
}

/// Kind of content injected into a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Summary,
}

/// One transcript entry
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Utc>,
    pub speaker: String,
    pub text: String,
    /// Slide that was current when the entry was recorded
    pub slide_index: usize,
}

/// Record of content injected into a slide
#[derive(Debug, Clone, Serialize)]
pub struct InjectionRecord {
    pub timestamp: DateTime<Utc>,
    pub slide_index: usize,
    /// Placeholder identifier in the deck markup (e.g. "AI:CONTENT")
    pub placeholder: String,
    pub kind: ContentKind,
    pub content: serde_json::Value,
}

/// Snapshot of the presentation state
#[derive(Debug, Clone, Serialize)]
pub struct DeckContext {
    pub current_slide: usize,
    pub total_slides: usize,
    pub transcript_entries: usize,
    pub injection_count: usize,
    pub recent_transcript: Vec<TranscriptEntry>,
    pub session_id: String,
    pub started_at: DateTime<Utc>,
}

struct DeckInner {
    current_slide: usize,
    total_slides: usize,
    transcript: Vec<TranscriptEntry>,
    injections: Vec<InjectionRecord>,
    session_id: String,
    started_at: DateTime<Utc>,
}

impl DeckInner {
    fn check_range(&self, index: usize) -> Result<()> {
        if self.total_slides > 0 && index >= self.total_slides {
            return Err(Error::Deck(format!(
                "slide index {index} out of range (0-{})",
                self.total_slides - 1
            )));
        }
        Ok(())
    }
}

/// Shared presentation state
///
/// All mutation goes through one async lock; the slide tools and the daemon
/// hold this behind an `Arc`.
pub struct DeckState {
    inner: Mutex<DeckInner>,
}

impl DeckState {
    /// Create state for a deck with `total_slides` slides
    ///
    /// A total of 0 means "unknown" and disables range validation.
    #[must_use]
    pub fn new(total_slides: usize) -> Self {
        Self {
            inner: Mutex::new(DeckInner {
                current_slide: 0,
                total_slides,
                transcript: Vec::new(),
                injections: Vec::new(),
                session_id: Uuid::new_v4().to_string(),
                started_at: Utc::now(),
            }),
        }
    }

    /// Get the current slide index
    pub async fn current_slide(&self) -> usize {
        self.inner.lock().await.current_slide
    }

    /// Set the current slide index
    ///
    /// # Errors
    ///
    /// Returns error if the index is out of range
    pub async fn set_current_slide(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.check_range(index)?;
        inner.current_slide = index;
        Ok(())
    }

    /// Get the total slide count
    pub async fn total_slides(&self) -> usize {
        self.inner.lock().await.total_slides
    }

    /// Set the total slide count
    pub async fn set_total_slides(&self, total: usize) {
        self.inner.lock().await.total_slides = total;
    }

    /// Navigate the deck and return the new slide index
    ///
    /// `index` is required for [`NavDirection::Jump`] and ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns error for a jump without an index or to an out-of-range slide
    pub async fn navigate(&self, direction: NavDirection, index: Option<usize>) -> Result<usize> {
        let mut inner = self.inner.lock().await;

        let new_index = match direction {
            NavDirection::Next => {
                if inner.total_slides > 0 {
                    (inner.current_slide + 1).min(inner.total_slides - 1)
                } else {
                    inner.current_slide + 1
                }
            }
            NavDirection::Prev => inner.current_slide.saturating_sub(1),
            NavDirection::Jump => {
                index.ok_or_else(|| Error::Deck("index required for jump".to_string()))?
            }
        };

        inner.check_range(new_index)?;
        inner.current_slide = new_index;
        Ok(new_index)
    }

    /// Append a transcript entry, tagged with the current slide
    pub async fn add_transcript_entry(&self, speaker: &str, text: &str) {
        let mut inner = self.inner.lock().await;
        let slide_index = inner.current_slide;
        inner.transcript.push(TranscriptEntry {
            timestamp: Utc::now(),
            speaker: speaker.to_string(),
            text: text.to_string(),
            slide_index,
        });
    }

    /// Get the `n` most recent transcript entries
    pub async fn recent_transcript(&self, n: usize) -> Vec<TranscriptEntry> {
        let inner = self.inner.lock().await;
        let start = inner.transcript.len().saturating_sub(n);
        inner.transcript[start..].to_vec()
    }

    /// Get all transcript entries recorded on a slide
    pub async fn transcript_for_slide(&self, slide_index: usize) -> Vec<TranscriptEntry> {
        let inner = self.inner.lock().await;
        inner
            .transcript
            .iter()
            .filter(|e| e.slide_index == slide_index)
            .cloned()
            .collect()
    }

    /// Record a content injection
    ///
    /// `slide_index` defaults to the current slide.
    pub async fn track_injection(
        &self,
        placeholder: &str,
        kind: ContentKind,
        content: serde_json::Value,
        slide_index: Option<usize>,
    ) {
        let mut inner = self.inner.lock().await;
        let slide_index = slide_index.unwrap_or(inner.current_slide);
        inner.injections.push(InjectionRecord {
            timestamp: Utc::now(),
            slide_index,
            placeholder: placeholder.to_string(),
            kind,
            content,
        });
    }

    /// Get all injections recorded for a slide
    pub async fn injections_for_slide(&self, slide_index: usize) -> Vec<InjectionRecord> {
        let inner = self.inner.lock().await;
        inner
            .injections
            .iter()
            .filter(|i| i.slide_index == slide_index)
            .cloned()
            .collect()
    }

    /// Get all injection records
    pub async fn injections(&self) -> Vec<InjectionRecord> {
        self.inner.lock().await.injections.clone()
    }

    /// Get a snapshot of the presentation state
    pub async fn context(&self) -> DeckContext {
        let inner = self.inner.lock().await;
        let start = inner.transcript.len().saturating_sub(5);
        DeckContext {
            current_slide: inner.current_slide,
            total_slides: inner.total_slides,
            transcript_entries: inner.transcript.len(),
            injection_count: inner.injections.len(),
            recent_transcript: inner.transcript[start..].to_vec(),
            session_id: inner.session_id.clone(),
            started_at: inner.started_at,
        }
    }

    /// Reset to initial state with a fresh session ID
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.current_slide = 0;
        inner.transcript.clear();
        inner.injections.clear();
        inner.session_id = Uuid::new_v4().to_string();
        inner.started_at = Utc::now();
    }
}
