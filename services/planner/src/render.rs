//! Plain-text rendering of plans for the terminal.

use lesson_pro_core::{LessonProgressionPlanRow, SavedPlan};

const HEADERS: [&str; 5] = [
    "Stage",
    "Duration",
    "Teacher's Role",
    "Learner's Activity",
    "Assessment Criteria",
];

/// Renders rows as a pipe-separated table, one stage per line.
pub fn render_plan(rows: &[LessonProgressionPlanRow]) -> String {
    let mut out = format!("| {} |\n", HEADERS.join(" | "));
    out.push_str(&format!("|{}\n", "---|".repeat(HEADERS.len())));
    for row in rows {
        let cells = [
            row.stage.as_str(),
            row.duration.as_str(),
            row.teacher_role.as_str(),
            row.learner_activity.as_str(),
            row.assessment_criteria.as_str(),
        ];
        let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// One line per saved plan: id, save time and title.
pub fn render_saved_plan_line(plan: &SavedPlan) -> String {
    format!("{:>15}  {}  {}", plan.id, plan.saved_at, plan.title)
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_row_and_escapes_pipes() {
        let rows = vec![LessonProgressionPlanRow {
            stage: "Engage".to_string(),
            duration: "5 min".to_string(),
            teacher_role: "Asks: light | dark?".to_string(),
            learner_activity: "Answer\naloud".to_string(),
            assessment_criteria: "Correct answers".to_string(),
        }];

        let table = render_plan(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| Stage | Duration"));
        assert_eq!(
            lines[2],
            "| Engage | 5 min | Asks: light \\| dark? | Answer aloud | Correct answers |"
        );
    }
}
