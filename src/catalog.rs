use anyhow::{Context, Result, bail};
use rust_embed::Embed;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/lessons/"]
struct CatalogAssets;

const BUILTIN_CATALOG: &str = "catalog.toml";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LessonError {
    #[error("lesson {index} does not exist (the catalog has {count} lessons)")]
    OutOfRange { index: usize, count: usize },
    #[error("lesson {index} has no exercises")]
    NoExercises { index: usize },
}

#[derive(Clone, Debug, Deserialize)]
pub struct Lesson {
    pub id: usize,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    pub instructions: String,
    #[serde(default)]
    pub preview: String,
    pub exercises: Vec<String>,
    #[serde(deserialize_with = "key_set")]
    pub target_keys: Vec<char>,
}

impl Lesson {
    pub fn is_target_key(&self, ch: char) -> bool {
        self.target_keys.contains(&ch)
    }
}

/// Target keys are written as a plain string; duplicates collapse, first
/// occurrence wins.
fn key_set<'de, D>(deserializer: D) -> std::result::Result<Vec<char>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let mut keys: Vec<char> = Vec::with_capacity(raw.len());
    for ch in raw.chars() {
        if !keys.contains(&ch) {
            keys.push(ch);
        }
    }
    Ok(keys)
}

#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    lessons: Vec<Lesson>,
}

impl Catalog {
    /// The lesson set compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let file = CatalogAssets::get(BUILTIN_CATALOG)
            .context("embedded lesson catalog is missing")?;
        let content = std::str::from_utf8(file.data.as_ref())
            .context("embedded lesson catalog is not UTF-8")?;
        Self::from_toml(content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content).context("failed to parse lesson catalog")?;
        for (position, lesson) in catalog.lessons.iter().enumerate() {
            // Progress records store lesson ids and navigation uses positions,
            // so the two must agree.
            if lesson.id != position {
                bail!(
                    "lesson '{}' has id {} but sits at position {position}",
                    lesson.title,
                    lesson.id
                );
            }
        }
        Ok(catalog)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn get(&self, index: usize) -> std::result::Result<&Lesson, LessonError> {
        self.lessons.get(index).ok_or(LessonError::OutOfRange {
            index,
            count: self.lessons.len(),
        })
    }
}
