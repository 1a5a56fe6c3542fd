use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriteria {
    Income,
    CreatedDate,
    FinishedDate,
    BudgetDate,
    Name,
    LastEdited,
}

impl SortCriteria {
    pub const ALL: [SortCriteria; 6] = [
        SortCriteria::BudgetDate,
        SortCriteria::CreatedDate,
        SortCriteria::FinishedDate,
        SortCriteria::Name,
        SortCriteria::Income,
        SortCriteria::LastEdited,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortCriteria::Income => "Income Amount",
            SortCriteria::CreatedDate => "Created Date",
            SortCriteria::FinishedDate => "Finished Date",
            SortCriteria::BudgetDate => "Budget Date",
            SortCriteria::Name => "Alphabetically",
            SortCriteria::LastEdited => "Last Edited",
        }
    }

    /// Direction chosen when this criteria is picked fresh.
    pub fn default_ascending(self) -> bool {
        matches!(self, SortCriteria::Name)
    }
}

/// An explicit ordering of the budget list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSort {
    pub criteria: SortCriteria,
    pub ascending: bool,
}

impl BudgetSort {
    /// Ordering used when nothing is selected.
    pub const DEFAULT: BudgetSort = BudgetSort {
        criteria: SortCriteria::BudgetDate,
        ascending: false,
    };

    pub fn new(criteria: SortCriteria, ascending: bool) -> Self {
        Self { criteria, ascending }
    }

    /// Result of clicking `criteria` while `current` is active: the same
    /// criteria flips direction, a new one starts at its default direction.
    pub fn toggled(current: Option<BudgetSort>, criteria: SortCriteria) -> BudgetSort {
        match current {
            Some(sort) if sort.criteria == criteria => BudgetSort {
                criteria,
                ascending: !sort.ascending,
            },
            _ => BudgetSort {
                criteria,
                ascending: criteria.default_ascending(),
            },
        }
    }

    /// The ordering actually sent to the backend.
    pub fn effective(current: Option<BudgetSort>) -> BudgetSort {
        current.unwrap_or(BudgetSort::DEFAULT)
    }

    /// Arrow shown next to a sort control; `None` means the control is not highlighted.
    pub fn indicator(current: Option<BudgetSort>, criteria: SortCriteria) -> Option<&'static str> {
        match current {
            Some(sort) if sort.criteria == criteria => Some(if sort.ascending { "↑" } else { "↓" }),
            _ => None,
        }
    }
}

/// Order of a category's ledger page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSort {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    CreatedDesc,
    CreatedAsc,
}

impl LedgerSort {
    pub const ALL: [LedgerSort; 6] = [
        LedgerSort::DateDesc,
        LedgerSort::DateAsc,
        LedgerSort::AmountDesc,
        LedgerSort::AmountAsc,
        LedgerSort::CreatedDesc,
        LedgerSort::CreatedAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LedgerSort::DateDesc => "date_desc",
            LedgerSort::DateAsc => "date_asc",
            LedgerSort::AmountDesc => "amount_desc",
            LedgerSort::AmountAsc => "amount_asc",
            LedgerSort::CreatedDesc => "created_desc",
            LedgerSort::CreatedAsc => "created_asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LedgerSort::DateDesc => "Newest first",
            LedgerSort::DateAsc => "Oldest first",
            LedgerSort::AmountDesc => "Largest amount",
            LedgerSort::AmountAsc => "Smallest amount",
            LedgerSort::CreatedDesc => "Recently added",
            LedgerSort::CreatedAsc => "First added",
        }
    }

    pub fn from_str_or_default(raw: &str) -> LedgerSort {
        LedgerSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == raw)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn same_criteria_flips_direction() {
        let asc = BudgetSort::new(SortCriteria::Name, true);
        assert_eq!(
            BudgetSort::toggled(Some(asc), SortCriteria::Name),
            BudgetSort::new(SortCriteria::Name, false)
        );
    }

    #[test]
    fn new_criteria_starts_descending_except_name() {
        let current = Some(BudgetSort::new(SortCriteria::Name, true));
        assert_eq!(
            BudgetSort::toggled(current, SortCriteria::Income),
            BudgetSort::new(SortCriteria::Income, false)
        );
        assert_eq!(
            BudgetSort::toggled(None, SortCriteria::Name),
            BudgetSort::new(SortCriteria::Name, true)
        );
    }

    #[test]
    fn no_selection_means_budget_date_descending() {
        assert_eq!(BudgetSort::effective(None), BudgetSort::new(SortCriteria::BudgetDate, false));
        assert_eq!(BudgetSort::indicator(None, SortCriteria::BudgetDate), None);
    }

    #[test]
    fn serializes_as_backend_sort_args() {
        assert_eq!(
            serde_json::to_value(BudgetSort::new(SortCriteria::LastEdited, true)).unwrap(),
            json!({"criteria": "last_edited", "ascending": true})
        );
    }

    #[test]
    fn unknown_ledger_sort_falls_back_to_newest() {
        assert_eq!(LedgerSort::from_str_or_default("amount_asc"), LedgerSort::AmountAsc);
        assert_eq!(LedgerSort::from_str_or_default("sideways"), LedgerSort::DateDesc);
    }
}
