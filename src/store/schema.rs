use serde::{Deserialize, Serialize};

/// Storage key the progress record lives under.
pub const PROGRESS_KEY: &str = "typingProgress";

/// The durable, cross-session summary. The JSON shape is fixed and carries
/// no version field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub completed_lessons: Vec<usize>,
    pub current_lesson: usize,
    pub stats: ProgressStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_keystrokes: u64,
    pub correct_keystrokes: u64,
    pub lessons_completed: u64,
}
