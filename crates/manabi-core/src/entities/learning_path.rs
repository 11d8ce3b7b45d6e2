use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A curated sequence of courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub courses: Vec<LearningPathCourse>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A course slot inside a learning path. `position` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathCourse {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub position: u32,
}

impl LearningPath {
    /// Move the course at index `from` to index `to`, renumbering positions
    /// to stay contiguous from 1.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PositionOutOfRange`] if either index does not
    /// address an existing course.
    pub fn move_course(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.courses.len();
        for index in [from, to] {
            if index >= len {
                return Err(CoreError::PositionOutOfRange { index, len });
            }
        }
        let course = self.courses.remove(from);
        self.courses.insert(to, course);
        self.renumber();
        Ok(())
    }

    /// Course IDs in their current order (the payload of a reorder request).
    #[must_use]
    pub fn course_order(&self) -> Vec<i64> {
        self.courses.iter().map(|c| c.course_id).collect()
    }

    fn renumber(&mut self) {
        for (position, course) in (1u32..).zip(self.courses.iter_mut()) {
            course.position = position;
        }
    }
}

/// Level-based roadmap shown on the learning path landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub stages: Vec<RoadmapStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStage {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}
