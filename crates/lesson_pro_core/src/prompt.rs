//! crates/lesson_pro_core/src/prompt.rs
//!
//! Turns a lesson form (and an optional resource) into the prompt sent to
//! the text-generation service.

use crate::domain::{LessonFormData, ResourceFile, Tone};

const SYSTEM_INSTRUCTIONS: &str = r#"You are an expert curriculum designer helping teachers in Zambia prepare lessons aligned with the Competency-Based Curriculum (CBC).

You write Lesson Progression Plans that follow the 5E instructional model, in this order:
1. Engage
2. Explore
3. Explain
4. Elaborate
5. Evaluate

For every stage describe how long it takes, what the teacher does, what the learners do, and how learning is assessed. Stage durations must add up to the total lesson duration.

Output format:
- Respond with ONLY a JSON array, no prose before or after it.
- Each element is an object with exactly these string fields:
  "stage", "duration", "teacherRole", "learnerActivity", "assessmentCriteria"
- Every field must be a non-empty string."#;

const USER_INPUT_TEMPLATE: &str = r#"Create a Lesson Progression Plan for the following lesson.

Teacher: {teacherName}
Subject: {subject}
Topic: {topic}
Grade: {grade}
Duration (minutes): {duration}
Competencies: {competencies}
Standards / Learning Outcomes: {standards}
Planned Activities: {activities}
Teaching Strategies: {teachingStrategies}
Teaching and Learning Resources: {resources}

Writing style: {tone}"#;

/// An image sent inline with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

impl InlineImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The payload handed to a `PlanGenerationService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPrompt {
    pub system: String,
    pub user: String,
    pub image: Option<InlineImage>,
}

fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => "Formal. Use a professional, academic register suitable for official school records.",
        Tone::Creative => "Creative. Use an engaging, imaginative register with vivid, learner-friendly activities.",
        Tone::Technical => "Technical. Use precise subject terminology and make every step specific and measurable.",
    }
}

/// Builds the prompt for one generation request.
///
/// Every form field is embedded verbatim. An image resource is attached
/// inline; any other resource is referenced by name only.
pub fn build_prompt(form: &LessonFormData, resource: Option<&ResourceFile>) -> PlanPrompt {
    let mut user = USER_INPUT_TEMPLATE
        .replace("{teacherName}", &form.teacher_name)
        .replace("{subject}", &form.subject)
        .replace("{topic}", &form.topic)
        .replace("{grade}", &form.grade)
        .replace("{duration}", &form.duration)
        .replace("{competencies}", &form.competencies)
        .replace("{standards}", &form.standards)
        .replace("{activities}", &form.activities)
        .replace("{teachingStrategies}", &form.teaching_strategies)
        .replace("{resources}", &form.resources)
        .replace("{tone}", tone_guidance(form.tone));

    let image = match resource {
        Some(file) if file.is_image() => {
            user.push_str(&format!(
                "\n\nThe teacher attached the image \"{}\". Use what it shows when planning the activities and resources.",
                file.name
            ));
            Some(InlineImage {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            })
        }
        Some(file) => {
            user.push_str(&format!(
                "\n\nThe teacher will also use a resource file named \"{}\" ({}). Refer to it where it fits the lesson.",
                file.name, file.mime_type
            ));
            None
        }
        None => None,
    };

    PlanPrompt {
        system: SYSTEM_INSTRUCTIONS.to_string(),
        user,
        image,
    }
}
