use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course in the catalogue (e.g. "JLPT N5 Grammar").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JLPT level label such as `N5`, when the course targets one.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub chapter_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A chapter inside a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Kind of learning unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Lesson,
    Vocabulary,
    Grammar,
    Kanji,
    Quiz,
    #[serde(other)]
    Other,
}

/// A single unit (lesson, quiz, …) inside a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i64,
    pub chapter_id: i64,
    pub title: String,
    #[serde(default = "default_kind")]
    pub kind: UnitKind,
    #[serde(default)]
    pub position: u32,
    /// Unit that must be completed before this one.
    #[serde(default)]
    pub prerequisite_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

const fn default_kind() -> UnitKind {
    UnitKind::Lesson
}
