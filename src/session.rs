use rand::Rng;

use crate::prompts;

/// In-memory state for one journaling sitting. Lives for the duration of
/// the process; only explicit exports persist anything.
#[derive(Debug, Clone)]
pub struct Session {
    /// Prompt currently shown above the editor; empty until the first draw.
    pub prompt: Option<&'static str>,
    /// Whether the ambient lantern backdrop is rendered.
    pub lantern: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            prompt: None,
            lantern: true,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a new random prompt and makes it the current one.
    pub fn generate_prompt<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let picked = prompts::pick(rng);
        self.prompt = Some(picked);
        picked
    }

    /// Flips the lantern backdrop and returns the new state.
    pub fn toggle_lantern(&mut self) -> bool {
        self.lantern = !self.lantern;
        self.lantern
    }
}

/// Word and character counts shown in the footer gauge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryStats {
    pub words: usize,
    pub chars: usize,
}

pub fn entry_stats(text: &str) -> EntryStats {
    EntryStats {
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
    }
}
