pub mod feedback;
pub mod input;
pub mod lesson;
pub mod matcher;
pub mod stats;
pub mod timer;

pub use input::{Key, KeyPress};
pub use lesson::{Completion, LessonSession, Phase, Step, Timing};
