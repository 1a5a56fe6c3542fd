//! Async store operations: one backend round trip each, results folded into
//! the store through reducer actions.
//!
//! Every failure is written to the store's single `error` slot (last write
//! wins) and also returned, so callers can react locally. Validation failures
//! are returned without a backend call and without touching `error`.

use chrono::Utc;

use super::{next_temp_id, Optimistic, StoreAction, StoreDispatch};
use crate::backend::commands::{
    AddBudgetCategory, AddCategoryEntry, ApplyTemplateToBudget, CreateMonthlyBudget, DeleteMonthlyBudget,
    FinishMonthlyBudget, GetBudgetCategoriesWithStats, GetCategoryLedger, ListMonthlyBudgetsSorted,
    SetCategoryAllocatedAmount, SoftDeleteCategoryEntry, UnfinishMonthlyBudget, UpdateBudgetTitle,
    UpdateCategoryEntry,
};
use crate::backend::Backend;
use crate::columns::ColumnSelection;
use crate::error::{AppError, Result};
use crate::model::{BudgetDraft, CategoryStats, LedgerEntry, NewCategory, NewEntry, UpdateEntry};
use crate::prefs::KeyValueStore;
use crate::sorting::{BudgetSort, LedgerSort, SortCriteria};
use crate::validation;

pub const LEDGER_PAGE_SIZE: u32 = 50;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

fn record<S: StoreDispatch>(store: &S, operation: &'static str, err: impl Into<AppError>) -> AppError {
    let err = err.into();
    tracing::error!(operation, error = %err, "store operation failed");
    store.dispatch(StoreAction::Failed(err.to_string()));
    err
}

pub fn dismiss_error<S: StoreDispatch>(store: &S) {
    store.dispatch(StoreAction::DismissError);
}

/// Reload the budget list in the store's current order.
pub async fn load_budgets<B: Backend, S: StoreDispatch>(backend: &B, store: &S) -> Result<()> {
    let sort = store.read(|s| BudgetSort::effective(s.budget_sort));
    load_budgets_sorted(backend, store, sort).await
}

async fn load_budgets_sorted<B: Backend, S: StoreDispatch>(backend: &B, store: &S, sort: BudgetSort) -> Result<()> {
    store.dispatch(StoreAction::Loading);
    tracing::debug!(criteria = ?sort.criteria, ascending = sort.ascending, "loading budgets");
    match backend.call(&ListMonthlyBudgetsSorted { args: sort }).await {
        Ok(budgets) => {
            store.dispatch(StoreAction::BudgetsLoaded(budgets));
            Ok(())
        }
        Err(err) => Err(record(store, "load_budgets", err)),
    }
}

/// Click on a sort control, then reload with the resulting order.
pub async fn change_budget_sort<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    criteria: SortCriteria,
) -> Result<BudgetSort> {
    let next = BudgetSort::toggled(store.read(|s| s.budget_sort), criteria);
    store.dispatch(StoreAction::SortChanged(Some(next)));
    load_budgets_sorted(backend, store, next).await?;
    Ok(next)
}

pub async fn clear_budget_sort<B: Backend, S: StoreDispatch>(backend: &B, store: &S) -> Result<()> {
    store.dispatch(StoreAction::SortChanged(None));
    load_budgets_sorted(backend, store, BudgetSort::DEFAULT).await
}

/// Create a budget and make it current. A second budget for the same month is
/// refused before reaching the backend.
pub async fn create_budget<B: Backend, S: StoreDispatch>(backend: &B, store: &S, mut draft: BudgetDraft) -> Result<i64> {
    let (existing, sort) = store.read(|s| (s.budgets.clone(), BudgetSort::effective(s.budget_sort)));
    draft.name = draft
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    validation::validate_budget_draft(&draft, &existing)?;

    let budget_id = backend
        .call(&CreateMonthlyBudget { args: draft })
        .await
        .map_err(|err| record(store, "create_budget", err))?;
    tracing::info!(budget_id, "budget created");

    load_budgets_sorted(backend, store, sort).await?;
    select_budget(backend, store, Some(budget_id)).await?;
    Ok(budget_id)
}

pub async fn delete_budget<B: Backend, S: StoreDispatch>(backend: &B, store: &S, budget_id: i64) -> Result<()> {
    backend
        .call(&DeleteMonthlyBudget { budget_id })
        .await
        .map_err(|err| record(store, "delete_budget", err))?;
    tracing::info!(budget_id, "budget deleted");
    store.dispatch(StoreAction::BudgetRemoved(budget_id));
    Ok(())
}

pub async fn finish_budget<B: Backend, S: StoreDispatch>(backend: &B, store: &S, budget_id: i64) -> Result<()> {
    backend
        .call(&FinishMonthlyBudget { budget_id })
        .await
        .map_err(|err| record(store, "finish_budget", err))?;
    tracing::info!(budget_id, "budget finished");
    store.dispatch(StoreAction::BudgetFinished {
        budget_id,
        finished_at: now_timestamp(),
    });
    Ok(())
}

pub async fn reopen_budget<B: Backend, S: StoreDispatch>(backend: &B, store: &S, budget_id: i64) -> Result<()> {
    backend
        .call(&UnfinishMonthlyBudget { budget_id })
        .await
        .map_err(|err| record(store, "reopen_budget", err))?;
    tracing::info!(budget_id, "budget reopened");
    store.dispatch(StoreAction::BudgetReopened {
        budget_id,
        edited_at: now_timestamp(),
    });
    Ok(())
}

/// Set or clear (empty title) a budget's custom name.
pub async fn rename_budget<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    budget_id: i64,
    title: &str,
) -> Result<()> {
    let title = title.trim().to_string();
    if title.chars().count() > validation::MAX_BUDGET_NAME_LEN {
        return Err(crate::error::ValidationError::new(
            "name",
            format!(
                "Budget name must be at most {} characters",
                validation::MAX_BUDGET_NAME_LEN
            ),
        )
        .into());
    }
    backend
        .call(&UpdateBudgetTitle {
            budget_id,
            title: title.clone(),
        })
        .await
        .map_err(|err| record(store, "rename_budget", err))?;
    store.dispatch(StoreAction::BudgetRenamed {
        budget_id,
        title,
        edited_at: now_timestamp(),
    });
    Ok(())
}

/// Make `budget_id` current and load its categories.
pub async fn select_budget<B: Backend, S: StoreDispatch>(backend: &B, store: &S, budget_id: Option<i64>) -> Result<()> {
    store.dispatch(StoreAction::BudgetSelected(budget_id));
    match budget_id {
        Some(budget_id) => fetch_categories_with_stats(backend, store, budget_id).await,
        None => Ok(()),
    }
}

/// Replace the category list. On failure the previous list stays.
pub async fn fetch_categories_with_stats<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    budget_id: i64,
) -> Result<()> {
    store.dispatch(StoreAction::Loading);
    match backend.call(&GetBudgetCategoriesWithStats { budget_id }).await {
        Ok(categories) => {
            tracing::debug!(budget_id, count = categories.len(), "categories loaded");
            store.dispatch(StoreAction::CategoriesLoaded { budget_id, categories });
            Ok(())
        }
        Err(err) => Err(record(store, "fetch_categories_with_stats", err)),
    }
}

/// Load the first page of a category's ledger.
pub async fn fetch_ledger<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    category_id: i64,
    sort: LedgerSort,
) -> Result<()> {
    let command = GetCategoryLedger {
        category_id,
        limit: LEDGER_PAGE_SIZE,
        offset: 0,
        sort,
    };
    match backend.call(&command).await {
        Ok(entries) => {
            store.dispatch(StoreAction::LedgerLoaded { category_id, entries });
            Ok(())
        }
        Err(err) => Err(record(store, "fetch_ledger", err)),
    }
}

/// Record an entry optimistically: it is visible, and the category stats
/// reflect it, before the backend answers. A rejection removes it again and
/// restores the stats.
pub async fn add_entry<B: Backend, S: StoreDispatch>(backend: &B, store: &S, entry: NewEntry) -> Result<LedgerEntry> {
    validation::validate_new_entry(&entry)?;

    let temp_id = next_temp_id();
    store.dispatch(StoreAction::Entry(Optimistic::Pending {
        temp_id,
        entry: entry.clone(),
        created_at: now_timestamp(),
    }));
    tracing::debug!(temp_id, category_id = entry.category_id, "entry pending");

    match backend.call(&AddCategoryEntry { payload: entry }).await {
        Ok(confirmed) => {
            tracing::info!(temp_id, entry_id = confirmed.entry_id, "entry committed");
            store.dispatch(StoreAction::Entry(Optimistic::Committed {
                temp_id,
                entry: confirmed.clone(),
            }));
            Ok(confirmed)
        }
        Err(err) => {
            tracing::warn!(temp_id, error = %err, "entry rolled back");
            store.dispatch(StoreAction::Entry(Optimistic::RolledBack {
                temp_id,
                error: err.to_string(),
            }));
            Err(err.into())
        }
    }
}

/// Update after the backend confirms. Category aggregates are left as they are.
pub async fn update_entry<B: Backend, S: StoreDispatch>(backend: &B, store: &S, update: UpdateEntry) -> Result<()> {
    validation::validate_update_entry(&update)?;
    backend
        .call(&UpdateCategoryEntry {
            payload: update.clone(),
        })
        .await
        .map_err(|err| record(store, "update_entry", err))?;
    tracing::info!(entry_id = update.entry_id, "entry updated");
    store.dispatch(StoreAction::EntryUpdated(update));
    Ok(())
}

pub async fn delete_entry<B: Backend, S: StoreDispatch>(backend: &B, store: &S, entry_id: i64) -> Result<()> {
    backend
        .call(&SoftDeleteCategoryEntry { entry_id })
        .await
        .map_err(|err| record(store, "delete_entry", err))?;
    tracing::info!(entry_id, "entry deleted");
    store.dispatch(StoreAction::EntryDeleted { entry_id });
    Ok(())
}

pub async fn set_allocated<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    category_id: i64,
    amount: f64,
) -> Result<()> {
    validation::validate_allocation(amount)?;
    backend
        .call(&SetCategoryAllocatedAmount { category_id, amount })
        .await
        .map_err(|err| record(store, "set_allocated", err))?;
    store.dispatch(StoreAction::AllocationSet { category_id, amount });
    Ok(())
}

pub async fn add_category<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    mut category: NewCategory,
) -> Result<i64> {
    category.category_name = category.category_name.trim().to_string();
    validation::validate_new_category(&category)?;
    let category_id = backend
        .call(&AddBudgetCategory {
            payload: category.clone(),
        })
        .await
        .map_err(|err| record(store, "add_category", err))?;
    tracing::info!(category_id, budget_id = category.budget_id, "category added");
    store.dispatch(StoreAction::CategoryAdded(CategoryStats::empty(
        category_id,
        category.budget_id,
        category.category_name,
        category.allocated_amount,
    )));
    Ok(category_id)
}

/// Replace the budget's categories with a template's and reload them.
pub async fn apply_template<B: Backend, S: StoreDispatch>(
    backend: &B,
    store: &S,
    budget_id: i64,
    template_id: i64,
) -> Result<()> {
    backend
        .call(&ApplyTemplateToBudget { budget_id, template_id })
        .await
        .map_err(|err| record(store, "apply_template", err))?;
    tracing::info!(budget_id, template_id, "template applied");
    fetch_categories_with_stats(backend, store, budget_id).await
}

/// Update the visible columns and persist them.
pub fn set_visible_columns<S: StoreDispatch>(
    store: &S,
    prefs: &impl KeyValueStore,
    selection: ColumnSelection,
) -> Result<()> {
    store.dispatch(StoreAction::ColumnsChanged(selection.clone()));
    selection
        .persist(prefs)
        .map_err(|err| record(store, "set_visible_columns", err))
}
