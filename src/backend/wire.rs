//! Response rows as the backend sends them.
//!
//! Older and newer commands disagree on key casing and on a few field names,
//! so the rows accept every spelling and are normalized into the model types
//! exactly once, here.

use serde::Deserialize;

use crate::model::{CategoryStats, EntryType, LedgerEntry};

#[derive(Debug, Deserialize)]
pub struct CategoryRow {
    #[serde(alias = "categoryId")]
    pub category_id: i64,
    #[serde(alias = "budgetId")]
    pub budget_id: i64,
    #[serde(alias = "categoryName", alias = "name")]
    pub category_name: String,
    #[serde(alias = "allocatedAmount", default)]
    pub allocated_amount: f64,
    #[serde(alias = "netAmount", default)]
    pub net_amount: f64,
    #[serde(alias = "remainingAmount", default)]
    pub remaining_amount: Option<f64>,
    #[serde(alias = "lastActivityAt", default)]
    pub last_activity_at: Option<String>,
    #[serde(alias = "entriesCount", default)]
    pub entries_count: u32,
}

impl From<CategoryRow> for CategoryStats {
    fn from(row: CategoryRow) -> Self {
        let remaining = row
            .remaining_amount
            .unwrap_or(row.allocated_amount + row.net_amount);
        CategoryStats {
            category_id: row.category_id,
            budget_id: row.budget_id,
            name: row.category_name,
            allocated: row.allocated_amount,
            net: row.net_amount,
            remaining,
            last_activity_at: row.last_activity_at,
            entries_count: row.entries_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LedgerRow {
    #[serde(alias = "entryId", alias = "expense_id", alias = "expenseId")]
    pub entry_id: i64,
    #[serde(alias = "categoryId")]
    pub category_id: i64,
    #[serde(alias = "entryType", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub what: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "where", default)]
    pub where_: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(alias = "expenseDate", default)]
    pub expense_date: Option<String>,
    pub amount: f64,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = String;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        // Rows written before entry types existed are expenses.
        let entry_type = match row.entry_type.as_deref() {
            Some(raw) => raw.parse::<EntryType>()?,
            None => EntryType::Expense,
        };
        let date = non_empty(row.date)
            .or_else(|| non_empty(row.expense_date))
            .ok_or_else(|| format!("ledger entry {} has no date", row.entry_id))?;
        if !row.amount.is_finite() {
            return Err(format!("ledger entry {} has a non-numeric amount", row.entry_id));
        }
        Ok(LedgerEntry {
            entry_id: row.entry_id,
            category_id: row.category_id,
            entry_type,
            what: non_empty(row.what)
                .or_else(|| non_empty(row.description))
                .unwrap_or_default(),
            place: non_empty(row.where_).or_else(|| non_empty(row.place)),
            amount: row.amount,
            date,
            created_at: row.created_at,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_rows_accept_camel_and_snake_case() {
        let snake: CategoryStats = serde_json::from_value(json!({
            "category_id": 1, "budget_id": 2, "category_name": "Food",
            "allocated_amount": 300.0, "net_amount": -45.5, "remaining_amount": 254.5,
            "last_activity_at": "2025-03-02", "entries_count": 3
        }))
        .unwrap();
        let camel: CategoryStats = serde_json::from_value(json!({
            "categoryId": 1, "budgetId": 2, "categoryName": "Food",
            "allocatedAmount": 300.0, "netAmount": -45.5, "remainingAmount": 254.5,
            "lastActivityAt": "2025-03-02", "entriesCount": 3
        }))
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.remaining, 254.5);
    }

    #[test]
    fn missing_remaining_is_derived() {
        let stats: CategoryStats = serde_json::from_value(json!({
            "categoryId": 1, "budgetId": 2, "categoryName": "Rent",
            "allocatedAmount": 1000.0, "netAmount": -250.0
        }))
        .unwrap();
        assert_eq!(stats.remaining, 750.0);
        assert_eq!(stats.entries_count, 0);
    }

    #[test]
    fn ledger_rows_resolve_legacy_field_names() {
        let entry: LedgerEntry = serde_json::from_value(json!({
            "expense_id": 9, "category_id": 1, "description": "Groceries",
            "place": "Market", "expense_date": "2025-03-04", "amount": 62.1,
            "created_at": "2025-03-04 18:00:00"
        }))
        .unwrap();
        assert_eq!(entry.entry_id, 9);
        assert_eq!(entry.entry_type, EntryType::Expense);
        assert_eq!(entry.what, "Groceries");
        assert_eq!(entry.place.as_deref(), Some("Market"));
        assert_eq!(entry.date, "2025-03-04");
    }

    #[test]
    fn primary_names_win_over_fallbacks() {
        let entry: LedgerEntry = serde_json::from_value(json!({
            "entryId": 3, "categoryId": 1, "entryType": "income",
            "what": "Refund", "description": "ignored",
            "where": "Shop", "place": "ignored",
            "date": "2025-03-05", "amount": 20.0, "createdAt": "x"
        }))
        .unwrap();
        assert_eq!(entry.what, "Refund");
        assert_eq!(entry.place.as_deref(), Some("Shop"));
        assert_eq!(entry.entry_type, EntryType::Income);
    }

    #[test]
    fn ledger_rows_without_a_date_are_rejected() {
        let result: Result<LedgerEntry, _> = serde_json::from_value(json!({
            "entryId": 3, "categoryId": 1, "what": "x", "amount": 1.0
        }));
        assert!(result.is_err());
    }
}
