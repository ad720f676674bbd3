//! crates/lesson_pro_core/src/domain.rs
//!
//! Defines the core data structures for the lesson planner.
//! The serde attributes keep the wire names of the stored records
//! (`teacherName`, `generationCount`, ...) so saved data stays readable.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Register requested from the model. Never changes the response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Formal,
    Creative,
    Technical,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Creative => "Creative",
            Tone::Technical => "Technical",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = FormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "creative" => Ok(Tone::Creative),
            "technical" => Ok(Tone::Technical),
            _ => Err(FormFieldError::InvalidTone(s.to_string())),
        }
    }
}

/// Errors raised while editing a [`LessonFormData`] field by name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormFieldError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Invalid tone '{0}' (expected Formal, Creative or Technical)")]
    InvalidTone(String),
}

/// The lesson parameters entered by the teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFormData {
    pub teacher_name: String,
    pub subject: String,
    pub topic: String,
    pub grade: String,
    /// Free text, e.g. "40" or "2 x 40 minutes".
    pub duration: String,
    pub competencies: String,
    pub standards: String,
    pub activities: String,
    pub teaching_strategies: String,
    pub resources: String,
    pub tone: Tone,
}

impl Default for LessonFormData {
    fn default() -> Self {
        Self {
            teacher_name: "Mr. A. Banda".to_string(),
            subject: "Biology".to_string(),
            topic: "Photosynthesis".to_string(),
            grade: "Form 2".to_string(),
            duration: "40".to_string(),
            competencies: "Learners should be able to explain the process of photosynthesis and its importance to life.".to_string(),
            standards: "By the end of the lesson, learners should be able to state the requirements for photosynthesis and write down its chemical equation.".to_string(),
            activities: "Observing a plant, watching a short video, drawing a diagram of the photosynthesis process, group discussions.".to_string(),
            teaching_strategies: "Question and Answer, Demonstration, Group Work".to_string(),
            resources: "Live potted plant, video clip, chart with diagram, notebooks.".to_string(),
            tone: Tone::Formal,
        }
    }
}

/// Selects one field of [`LessonFormData`]. Parsed from the camelCase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TeacherName,
    Subject,
    Topic,
    Grade,
    Duration,
    Competencies,
    Standards,
    Activities,
    TeachingStrategies,
    Resources,
    Tone,
}

impl FromStr for FormField {
    type Err = FormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "teacherName" => FormField::TeacherName,
            "subject" => FormField::Subject,
            "topic" => FormField::Topic,
            "grade" => FormField::Grade,
            "duration" => FormField::Duration,
            "competencies" => FormField::Competencies,
            "standards" => FormField::Standards,
            "activities" => FormField::Activities,
            "teachingStrategies" => FormField::TeachingStrategies,
            "resources" => FormField::Resources,
            "tone" => FormField::Tone,
            other => return Err(FormFieldError::UnknownField(other.to_string())),
        };
        Ok(field)
    }
}

impl LessonFormData {
    /// Replaces a single field. The form is only ever edited one field at a time.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormFieldError> {
        let slot = match field {
            FormField::Tone => {
                self.tone = value.parse()?;
                return Ok(());
            }
            FormField::TeacherName => &mut self.teacher_name,
            FormField::Subject => &mut self.subject,
            FormField::Topic => &mut self.topic,
            FormField::Grade => &mut self.grade,
            FormField::Duration => &mut self.duration,
            FormField::Competencies => &mut self.competencies,
            FormField::Standards => &mut self.standards,
            FormField::Activities => &mut self.activities,
            FormField::TeachingStrategies => &mut self.teaching_strategies,
            FormField::Resources => &mut self.resources,
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// An optional attachment sent along with a generation request.
///
/// Images travel as base64 data; for every other type `data` is just the
/// file name, since only images can be inlined into the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub data: String,
}

impl ResourceFile {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let mime_type = mime_type.into();
        let data = if mime_type.starts_with("image/") {
            STANDARD.encode(bytes)
        } else {
            name.clone()
        };
        Self {
            name,
            mime_type,
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// One stage of a lesson (Engage, Explore, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgressionPlanRow {
    pub stage: String,
    pub duration: String,
    pub teacher_role: String,
    pub learner_activity: String,
    pub assessment_criteria: String,
}

/// A persisted snapshot of a generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    pub id: i64,
    pub title: String,
    /// ISO-8601, UTC.
    pub saved_at: String,
    pub form_data: LessonFormData,
    pub plan_data: Vec<LessonProgressionPlanRow>,
}

// Represents an account in the local user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    // Older records were written without a counter.
    #[serde(default)]
    pub generation_count: u32,
}
