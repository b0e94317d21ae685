//! Typewriter text cycler: types a word one character at a time, holds it,
//! deletes it, holds the empty line, then moves on to the next word. Loops
//! forever over the word list.

use rand::Rng;
use serde::Deserialize;

use crate::error::{FxError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypewriterTiming {
    /// Delay between mounting and the first keystroke.
    pub start_delay_ms: u32,
    pub type_base_ms: u32,
    pub delete_base_ms: u32,
    /// Random extra added to every keystroke, in `[0, jitter_ms)`.
    pub jitter_ms: u32,
    pub pause_after_type_ms: u32,
    pub pause_after_delete_ms: u32,
}

impl TypewriterTiming {
    /// Longest delay any single step may ask for.
    pub const MAX_DELAY_MS: u32 = 60_000;

    /// Every delay, labelled for error messages.
    pub fn delays(&self) -> [(&'static str, u32); 6] {
        [
            ("start_delay_ms", self.start_delay_ms),
            ("type_base_ms", self.type_base_ms),
            ("delete_base_ms", self.delete_base_ms),
            ("jitter_ms", self.jitter_ms),
            ("pause_after_type_ms", self.pause_after_type_ms),
            ("pause_after_delete_ms", self.pause_after_delete_ms),
        ]
    }
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        TypewriterTiming {
            start_delay_ms: 500,
            type_base_ms: 120,
            delete_base_ms: 40,
            jitter_ms: 40,
            pause_after_type_ms: 2500,
            pause_after_delete_ms: 800,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausedAfterType,
    Deleting,
    PausedAfterDelete,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<String>,
    timing: TypewriterTiming,
    word_index: usize,
    // characters of the current word on screen
    shown: usize,
    text: String,
    phase: Phase,
}

impl Typewriter {
    pub fn new<S: Into<String>>(words: Vec<S>, timing: TypewriterTiming) -> Result<Typewriter> {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(FxError::EmptyWordList);
        }
        Ok(Typewriter {
            words,
            timing,
            word_index: 0,
            shown: 0,
            text: String::new(),
            phase: Phase::Typing,
        })
    }

    /// Performs one transition and returns the delay before the next one.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let word_len = self.words[self.word_index].chars().count();

        match self.phase {
            Phase::Typing => {
                if self.shown < word_len {
                    self.shown += 1;
                    self.refresh_text();
                }
                if self.shown >= word_len {
                    self.phase = Phase::PausedAfterType;
                    self.timing.pause_after_type_ms
                } else {
                    self.keystroke_delay(self.timing.type_base_ms, rng)
                }
            }
            Phase::PausedAfterType => {
                self.phase = Phase::Deleting;
                self.keystroke_delay(self.timing.delete_base_ms, rng)
            }
            Phase::Deleting => {
                if self.shown > 0 {
                    self.shown -= 1;
                    self.refresh_text();
                }
                if self.shown == 0 {
                    self.phase = Phase::PausedAfterDelete;
                    self.timing.pause_after_delete_ms
                } else {
                    self.keystroke_delay(self.timing.delete_base_ms, rng)
                }
            }
            Phase::PausedAfterDelete => {
                self.word_index = (self.word_index + 1) % self.words.len();
                self.phase = Phase::Typing;
                self.keystroke_delay(self.timing.type_base_ms, rng)
            }
        }
    }

    /// Back to the first word with an empty line.
    pub fn restart(&mut self) {
        self.word_index = 0;
        self.shown = 0;
        self.text.clear();
        self.phase = Phase::Typing;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_word(&self) -> &str {
        &self.words[self.word_index]
    }

    pub fn timing(&self) -> &TypewriterTiming {
        &self.timing
    }

    fn keystroke_delay<R: Rng + ?Sized>(&self, base_ms: u32, rng: &mut R) -> u32 {
        let jitter = (rng.gen::<f64>() * self.timing.jitter_ms as f64) as u32;
        base_ms.saturating_add(jitter)
    }

    fn refresh_text(&mut self) {
        self.text = self.words[self.word_index].chars().take(self.shown).collect();
    }
}
