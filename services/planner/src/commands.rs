//! services/planner/src/commands.rs
//!
//! The work behind the CLI subcommands, kept apart from argument parsing so
//! it can be driven from tests.

use std::path::Path;

use lesson_pro_core::{
    FormField, LessonFormData, LessonPlanner, LessonProgressionPlanRow, ResourceFile, SavedPlan,
    UserRecord,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;

/// Splits a `field=value` assignment.
pub fn parse_assignment(raw: &str) -> Result<(FormField, &str), CliError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::Internal(format!("Expected field=value, got '{}'", raw)))?;
    Ok((name.trim().parse()?, value))
}

/// Assembles the lesson form.
///
/// Starts from `form_path` (JSON) or the default form. Without a file, the
/// teacher name comes from the signed-in account. `assignments` are applied
/// last, one field at a time.
pub fn build_form(
    form_path: Option<&Path>,
    assignments: &[String],
    current_user: Option<&UserRecord>,
) -> Result<LessonFormData, CliError> {
    let mut form = match form_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => {
            let mut form = LessonFormData::default();
            if let Some(user) = current_user {
                form.teacher_name = user.name.clone();
            }
            form
        }
    };

    for raw in assignments {
        let (field, value) = parse_assignment(raw)?;
        form.set_field(field, value)?;
    }
    Ok(form)
}

/// What a `generate` run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub rows: Vec<LessonProgressionPlanRow>,
    pub saved: Option<SavedPlan>,
}

/// Generates a plan and, when asked, saves it.
pub async fn generate_plan(
    planner: &LessonPlanner,
    form: &LessonFormData,
    resource: Option<&ResourceFile>,
    save: bool,
    cancel: &CancellationToken,
) -> Result<GenerateReport, CliError> {
    let rows = planner.generate(form, resource, cancel).await?;
    let saved = if save {
        Some(planner.plans().save(form, &rows)?)
    } else {
        None
    };
    info!(rows = rows.len(), saved = saved.is_some(), "Generate command finished");
    Ok(GenerateReport { rows, saved })
}
