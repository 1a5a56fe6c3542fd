//! Client-side checks run before a form reaches the backend.
//!
//! Every validator collects all failures of a form into [`FieldErrors`] so the
//! view can show each message next to its field.

use chrono::NaiveDate;

use crate::error::{FieldErrors, ValidationError};
use crate::format::{month_name, parse_amount};
use crate::model::{
    BudgetDraft, EntryType, GlobalCategoryDraft, MonthlyBudget, NewCategory, NewEntry, TemplateDraft, UpdateEntry,
};

pub const MAX_BUDGET_NAME_LEN: usize = 100;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Raw ledger-entry form values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryForm {
    pub entry_type: Option<EntryType>,
    pub what: String,
    pub place: String,
    pub amount: String,
    pub date: String,
}

impl EntryForm {
    pub fn from_entry(entry: &crate::model::LedgerEntry) -> Self {
        Self {
            entry_type: Some(entry.entry_type),
            what: entry.what.clone(),
            place: entry.place.clone().unwrap_or_default(),
            amount: entry.amount.to_string(),
            date: entry.date.clone(),
        }
    }

    fn check(&self) -> (FieldErrors, f64) {
        let mut errors = FieldErrors::new();
        if self.what.trim().is_empty() {
            errors.push(ValidationError::new("what", "Description is required"));
        }
        let amount = parse_amount(&self.amount).unwrap_or(0.0);
        if amount <= 0.0 {
            errors.push(ValidationError::new("amount", "Amount must be greater than 0"));
        }
        if self.date.trim().is_empty() {
            errors.push(ValidationError::new("date", "Date is required"));
        } else if NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            errors.push(ValidationError::new("date", "Date must be YYYY-MM-DD"));
        }
        (errors, amount)
    }

    fn place(&self) -> Option<String> {
        Some(self.place.trim().to_string()).filter(|p| !p.is_empty())
    }

    pub fn to_new_entry(&self, category_id: i64) -> Result<NewEntry, FieldErrors> {
        let (errors, amount) = self.check();
        errors.into_result(NewEntry {
            category_id,
            entry_type: self.entry_type.unwrap_or(EntryType::Expense),
            what: self.what.trim().to_string(),
            place: self.place(),
            amount,
            date: self.date.trim().to_string(),
        })
    }

    pub fn to_update(&self, entry_id: i64) -> Result<UpdateEntry, FieldErrors> {
        let (errors, amount) = self.check();
        errors.into_result(UpdateEntry {
            entry_id,
            entry_type: self.entry_type.unwrap_or(EntryType::Expense),
            what: self.what.trim().to_string(),
            place: self.place(),
            amount,
            date: self.date.trim().to_string(),
        })
    }
}

fn check_entry_fields(what: &str, amount: f64, date: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if what.trim().is_empty() {
        errors.push(ValidationError::new("what", "Description is required"));
    }
    if !(amount.is_finite() && amount > 0.0) {
        errors.push(ValidationError::new("amount", "Amount must be greater than 0"));
    }
    if date.trim().is_empty() {
        errors.push(ValidationError::new("date", "Date is required"));
    }
    errors
}

pub fn validate_new_entry(entry: &NewEntry) -> Result<(), FieldErrors> {
    check_entry_fields(&entry.what, entry.amount, &entry.date).into_result(())
}

pub fn validate_update_entry(entry: &UpdateEntry) -> Result<(), FieldErrors> {
    check_entry_fields(&entry.what, entry.amount, &entry.date).into_result(())
}

/// Budget creation rules, including the one-budget-per-month check against
/// the budgets already loaded.
pub fn validate_budget_draft(draft: &BudgetDraft, existing: &[MonthlyBudget]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if !(1..=12).contains(&draft.month) {
        errors.push(ValidationError::new("month", "Month must be between 1 and 12"));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&draft.year) {
        errors.push(ValidationError::new(
            "year",
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"),
        ));
    }
    if !(draft.total_income.is_finite() && draft.total_income > 0.0) {
        errors.push(ValidationError::new("total_income", "Please enter a valid income amount"));
    }
    if let Some(name) = &draft.name {
        if name.chars().count() > MAX_BUDGET_NAME_LEN {
            errors.push(ValidationError::new(
                "name",
                format!("Budget name must be at most {MAX_BUDGET_NAME_LEN} characters"),
            ));
        }
    }
    if existing.iter().any(|b| b.covers(draft.month, draft.year)) {
        errors.push(ValidationError::new(
            "month",
            format!(
                "A budget for {} {} already exists",
                month_name(draft.month),
                draft.year
            ),
        ));
    }
    errors.into_result(())
}

pub fn validate_new_category(category: &NewCategory) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if category.category_name.trim().is_empty() {
        errors.push(ValidationError::new("category_name", "Category name is required"));
    }
    if let Err(err) = validate_allocation(category.allocated_amount) {
        errors.push(err);
    }
    errors.into_result(())
}

pub fn validate_allocation(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("allocated", "Allocated amount cannot be negative"))
    }
}

pub fn validate_global_category(draft: &GlobalCategoryDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if draft.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Category name is required"));
    }
    errors.into_result(())
}

pub fn validate_template(draft: &TemplateDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if draft.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Template name is required"));
    }
    if draft.categories.is_empty() {
        errors.push(ValidationError::new("categories", "Add at least one category"));
    }
    if draft
        .categories
        .iter()
        .any(|c| !(c.allocated_amount.is_finite() && c.allocated_amount >= 0.0))
    {
        errors.push(ValidationError::new("categories", "Amounts cannot be negative"));
    }
    errors.into_result(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2025() -> MonthlyBudget {
        MonthlyBudget {
            budget_id: 1,
            month: 3,
            year: 2025,
            total_income: 5000.0,
            created_at: String::new(),
            finished_at: None,
            first_finished_at: None,
            name: None,
            last_edited: String::new(),
        }
    }

    fn draft(month: u32, year: i32, income: f64) -> BudgetDraft {
        BudgetDraft {
            month,
            year,
            total_income: income,
            name: None,
        }
    }

    #[test]
    fn entry_form_reports_every_missing_field() {
        let errors = EntryForm::default().to_new_entry(1).unwrap_err();
        assert_eq!(errors.get("what"), Some("Description is required"));
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert_eq!(errors.get("date"), Some("Date is required"));
    }

    #[test]
    fn entry_form_trims_and_parses() {
        let form = EntryForm {
            entry_type: Some(EntryType::Income),
            what: "  Paycheck ".to_string(),
            place: "   ".to_string(),
            amount: "1,200.50".to_string(),
            date: "2025-03-15".to_string(),
        };
        let entry = form.to_new_entry(4).unwrap();
        assert_eq!(entry.what, "Paycheck");
        assert_eq!(entry.place, None);
        assert_eq!(entry.amount, 1200.5);
        assert_eq!(entry.category_id, 4);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let form = EntryForm {
            what: "Refund".to_string(),
            amount: "-3".to_string(),
            date: "2025-03-15".to_string(),
            ..EntryForm::default()
        };
        assert!(form.to_new_entry(1).unwrap_err().get("amount").is_some());
    }

    #[test]
    fn duplicate_month_is_rejected() {
        let errors = validate_budget_draft(&draft(3, 2025, 100.0), &[march_2025()]).unwrap_err();
        let message = errors.get("month").unwrap();
        assert!(message.contains("already exists"), "{message}");
        assert!(validate_budget_draft(&draft(4, 2025, 100.0), &[march_2025()]).is_ok());
    }

    #[test]
    fn budget_bounds_are_enforced() {
        let errors = validate_budget_draft(&draft(13, 1899, 0.0), &[]).unwrap_err();
        assert_eq!(errors.len(), 3);
        let mut long = draft(1, 2025, 10.0);
        long.name = Some("x".repeat(101));
        assert!(validate_budget_draft(&long, &[]).unwrap_err().get("name").is_some());
    }

    #[test]
    fn allocation_allows_zero_but_not_negative() {
        assert!(validate_allocation(0.0).is_ok());
        assert!(validate_allocation(-1.0).is_err());
        assert!(validate_allocation(f64::NAN).is_err());
    }
}
