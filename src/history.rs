//! Labels for the budget change-history table.

use crate::model::BudgetChangeHistoryEntry;

const IN_PROGRESS: &str = "In Progress";
const FINISHED: &str = "Finished";
const NO_VALUE: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusMove {
    Finished,
    Reopened,
    Unknown,
}

fn status_move(description: &str) -> StatusMove {
    let description = description.to_ascii_lowercase();
    // "unfinished" contains "finished", so reopen markers are checked first.
    if ["unfinished", "reopened", "editing"].iter().any(|m| description.contains(m)) {
        StatusMove::Reopened
    } else if description.contains("finished") {
        StatusMove::Finished
    } else {
        StatusMove::Unknown
    }
}

/// Action column text.
pub fn action_label(entry: &BudgetChangeHistoryEntry) -> String {
    match entry.change_type.as_str() {
        "status_change" => match status_move(&entry.change_description) {
            StatusMove::Finished => "Finished Budget".to_string(),
            StatusMove::Reopened => "Reopened Budget".to_string(),
            StatusMove::Unknown => "Status Changed".to_string(),
        },
        "title_change" => "Edited Title".to_string(),
        "field_change" => match entry.field_name.as_deref() {
            Some(field) if !field.is_empty() => format!("Edited {field}"),
            _ => "Edited Budget".to_string(),
        },
        "creation" => "Budget Created".to_string(),
        _ => "Unknown Action".to_string(),
    }
}

/// Old and new value columns, with readable stand-ins for status changes.
pub fn old_new_values(entry: &BudgetChangeHistoryEntry) -> (String, String) {
    if let (Some(old), Some(new)) = (entry.old_value.as_deref(), entry.new_value.as_deref()) {
        if !old.is_empty() && !new.is_empty() {
            return (old.to_string(), new.to_string());
        }
    }
    let (old, new) = if entry.change_type == "status_change" {
        match status_move(&entry.change_description) {
            StatusMove::Finished => (IN_PROGRESS, FINISHED),
            StatusMove::Reopened => (FINISHED, IN_PROGRESS),
            StatusMove::Unknown => (NO_VALUE, NO_VALUE),
        }
    } else {
        (NO_VALUE, NO_VALUE)
    };
    (old.to_string(), new.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(change_type: &str, description: &str) -> BudgetChangeHistoryEntry {
        BudgetChangeHistoryEntry {
            change_id: 1,
            budget_id: 1,
            change_type: change_type.to_string(),
            field_name: None,
            old_value: None,
            new_value: None,
            change_description: description.to_string(),
            changed_at: "2025-03-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn status_changes_read_as_finish_or_reopen() {
        let finished = entry("status_change", "Budget marked as finished");
        assert_eq!(action_label(&finished), "Finished Budget");
        assert_eq!(old_new_values(&finished), ("In Progress".into(), "Finished".into()));

        let reopened = entry("status_change", "Budget unfinished for editing");
        assert_eq!(action_label(&reopened), "Reopened Budget");
        assert_eq!(old_new_values(&reopened), ("Finished".into(), "In Progress".into()));
    }

    #[test]
    fn field_changes_name_the_field() {
        let mut change = entry("field_change", "");
        assert_eq!(action_label(&change), "Edited Budget");
        change.field_name = Some("total_income".to_string());
        assert_eq!(action_label(&change), "Edited total_income");
    }

    #[test]
    fn explicit_values_win_and_missing_ones_render_dashes() {
        let mut change = entry("title_change", "Title updated");
        assert_eq!(old_new_values(&change), ("-".into(), "-".into()));
        change.old_value = Some("March".to_string());
        change.new_value = Some("Spring".to_string());
        assert_eq!(old_new_values(&change), ("March".into(), "Spring".into()));
        assert_eq!(action_label(&change), "Edited Title");
        assert_eq!(action_label(&entry("mystery", "")), "Unknown Action");
    }
}
