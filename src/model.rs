use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::wire::{CategoryRow, LedgerRow};
use crate::format::month_name;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Expense,
    Income,
    Adjustment,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Expense, EntryType::Income, EntryType::Adjustment];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Expense => "expense",
            EntryType::Income => "income",
            EntryType::Adjustment => "adjustment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryType::Expense => "Expense (Outflow)",
            EntryType::Income => "Income (Inflow)",
            EntryType::Adjustment => "Adjustment",
        }
    }

    /// Display-only marker next to an entry.
    pub fn glyph(self) -> &'static str {
        match self {
            EntryType::Income => "+",
            EntryType::Expense => "-",
            EntryType::Adjustment => "±",
        }
    }

    /// Contribution of one unit of `amount` to a category's net.
    /// Adjustments are excluded from the backend's net aggregate.
    pub fn net_sign(self) -> f64 {
        match self {
            EntryType::Income => 1.0,
            EntryType::Expense => -1.0,
            EntryType::Adjustment => 0.0,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(EntryType::Expense),
            "income" => Ok(EntryType::Income),
            "adjustment" => Ok(EntryType::Adjustment),
            other => Err(format!("unknown entry type `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthlyBudget {
    #[serde(alias = "budgetId")]
    pub budget_id: i64,
    pub month: u32,
    pub year: i32,
    #[serde(alias = "totalIncome")]
    pub total_income: f64,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
    #[serde(alias = "finishedAt", default)]
    pub finished_at: Option<String>,
    #[serde(alias = "firstFinishedAt", default)]
    pub first_finished_at: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "lastEdited", default)]
    pub last_edited: String,
}

impl MonthlyBudget {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// "March 2025".
    pub fn period_label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    /// Custom title when set, otherwise the budget period.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.period_label(),
        }
    }

    pub fn covers(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "CategoryRow")]
pub struct CategoryStats {
    pub category_id: i64,
    pub budget_id: i64,
    pub name: String,
    pub allocated: f64,
    pub net: f64,
    pub remaining: f64,
    pub last_activity_at: Option<String>,
    pub entries_count: u32,
}

impl CategoryStats {
    /// A freshly created category: nothing recorded against it yet.
    pub fn empty(category_id: i64, budget_id: i64, name: impl Into<String>, allocated: f64) -> Self {
        Self {
            category_id,
            budget_id,
            name: name.into(),
            allocated,
            net: 0.0,
            remaining: allocated,
            last_activity_at: None,
            entries_count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "LedgerRow")]
pub struct LedgerEntry {
    pub entry_id: i64,
    pub category_id: i64,
    pub entry_type: EntryType,
    pub what: String,
    pub place: Option<String>,
    pub amount: f64,
    pub date: String,
    pub created_at: String,
}

impl LedgerEntry {
    pub fn is_provisional(&self) -> bool {
        self.entry_id < 0
    }

    pub fn apply_update(&mut self, update: &UpdateEntry) {
        self.entry_type = update.entry_type;
        self.what = update.what.clone();
        self.place = update.place.clone();
        self.amount = update.amount;
        self.date = update.date.clone();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub category_id: i64,
    pub entry_type: EntryType,
    pub what: String,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    pub amount: f64,
    pub date: String,
}

impl NewEntry {
    /// The signed change this entry makes to its category's net.
    pub fn net_delta(&self) -> f64 {
        self.entry_type.net_sign() * self.amount
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntry {
    pub entry_id: i64,
    pub entry_type: EntryType,
    pub what: String,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    pub amount: f64,
    pub date: String,
}

impl UpdateEntry {
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            entry_id: entry.entry_id,
            entry_type: entry.entry_type,
            what: entry.what.clone(),
            place: entry.place.clone(),
            amount: entry.amount,
            date: entry.date.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub budget_id: i64,
    pub category_name: String,
    pub allocated_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetChangeHistoryEntry {
    #[serde(alias = "changeId")]
    pub change_id: i64,
    #[serde(alias = "budgetId")]
    pub budget_id: i64,
    #[serde(alias = "changeType")]
    pub change_type: String,
    #[serde(alias = "fieldName", default)]
    pub field_name: Option<String>,
    #[serde(alias = "oldValue", default)]
    pub old_value: Option<String>,
    #[serde(alias = "newValue", default)]
    pub new_value: Option<String>,
    #[serde(alias = "changeDescription", default)]
    pub change_description: String,
    #[serde(alias = "changedAt")]
    pub changed_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GlobalCategory {
    #[serde(alias = "globalCategoryId")]
    pub global_category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GlobalCategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Expense,
    Savings,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Savings => "savings",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetTemplate {
    #[serde(alias = "templateId")]
    pub template_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
    #[serde(alias = "categoryCount", default)]
    pub category_count: u32,
    #[serde(alias = "totalAmount", default)]
    pub total_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TemplateCategory {
    #[serde(alias = "templateCategoryId")]
    pub template_category_id: i64,
    #[serde(alias = "globalCategoryId")]
    pub global_category_id: i64,
    #[serde(alias = "categoryName")]
    pub category_name: String,
    #[serde(alias = "allocatedAmount")]
    pub allocated_amount: f64,
    #[serde(alias = "categoryType", default)]
    pub category_type: CategoryKind,
    #[serde(alias = "sortOrder", default)]
    pub sort_order: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetTemplateWithCategories {
    #[serde(alias = "templateId")]
    pub template_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub categories: Vec<TemplateCategory>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TemplateDraft {
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<TemplateCategoryDraft>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateCategoryDraft {
    pub global_category_id: i64,
    pub allocated_amount: f64,
    pub category_type: CategoryKind,
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn budget(name: Option<&str>) -> MonthlyBudget {
        MonthlyBudget {
            budget_id: 1,
            month: 3,
            year: 2025,
            total_income: 4000.0,
            created_at: "2025-03-01 09:00:00".to_string(),
            finished_at: None,
            first_finished_at: None,
            name: name.map(str::to_string),
            last_edited: "2025-03-01 09:00:00".to_string(),
        }
    }

    #[test]
    fn display_name_falls_back_to_period() {
        assert_eq!(budget(None).display_name(), "March 2025");
        assert_eq!(budget(Some("  ")).display_name(), "March 2025");
        assert_eq!(budget(Some("Spring")).display_name(), "Spring");
    }

    #[test]
    fn entry_types_parse_case_insensitively() {
        assert_eq!("Income".parse::<EntryType>(), Ok(EntryType::Income));
        assert!("refund".parse::<EntryType>().is_err());
    }

    #[test]
    fn new_entry_serializes_with_tauri_field_names() {
        let entry = NewEntry {
            category_id: 7,
            entry_type: EntryType::Expense,
            what: "Coffee".to_string(),
            place: Some("Corner cafe".to_string()),
            amount: 4.5,
            date: "2025-03-02".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "categoryId": 7,
                "entryType": "expense",
                "what": "Coffee",
                "where": "Corner cafe",
                "amount": 4.5,
                "date": "2025-03-02"
            })
        );
        assert_eq!(entry.net_delta(), -4.5);
    }

    #[test]
    fn budgets_accept_either_key_style() {
        let snake: MonthlyBudget = serde_json::from_value(json!({
            "budget_id": 4, "month": 5, "year": 2024, "total_income": 10.0,
            "created_at": "c", "last_edited": "e"
        }))
        .unwrap();
        let camel: MonthlyBudget = serde_json::from_value(json!({
            "budgetId": 4, "month": 5, "year": 2024, "totalIncome": 10.0,
            "createdAt": "c", "lastEdited": "e"
        }))
        .unwrap();
        assert_eq!(snake, camel);
    }
}
