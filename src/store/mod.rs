//! Client-side mirror of budget data.
//!
//! [`BudgetStore::apply`] is the only place state changes. Under Yew the store
//! lives in a `use_reducer` handle; async operations in [`ops`] reach it
//! through [`StoreDispatch`] so they run the same way against a plain
//! `RefCell` in tests.

pub mod ops;
pub mod optimistic;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use yew::{Reducible, UseReducerHandle};

use crate::columns::ColumnSelection;
use crate::model::{CategoryStats, LedgerEntry, MonthlyBudget, UpdateEntry};
use crate::sorting::BudgetSort;

pub use self::optimistic::{next_temp_id, Optimistic, PendingEntry, StatsSnapshot};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetStore {
    pub budgets: Vec<MonthlyBudget>,
    pub current_budget_id: Option<i64>,
    /// `None` is the unselected default ordering.
    pub budget_sort: Option<BudgetSort>,
    pub categories: Vec<CategoryStats>,
    /// Newest first, keyed by category id.
    pub entries: HashMap<i64, Vec<LedgerEntry>>,
    pub visible_columns: ColumnSelection,
    pub pending: BTreeMap<i64, PendingEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreAction {
    Loading,
    Failed(String),
    DismissError,
    BudgetsLoaded(Vec<MonthlyBudget>),
    SortChanged(Option<BudgetSort>),
    BudgetSelected(Option<i64>),
    BudgetRemoved(i64),
    BudgetFinished { budget_id: i64, finished_at: String },
    BudgetReopened { budget_id: i64, edited_at: String },
    BudgetRenamed { budget_id: i64, title: String, edited_at: String },
    CategoriesLoaded { budget_id: i64, categories: Vec<CategoryStats> },
    LedgerLoaded { category_id: i64, entries: Vec<LedgerEntry> },
    Entry(Optimistic),
    EntryUpdated(UpdateEntry),
    EntryDeleted { entry_id: i64 },
    AllocationSet { category_id: i64, amount: f64 },
    CategoryAdded(CategoryStats),
    ColumnsChanged(ColumnSelection),
}

impl BudgetStore {
    pub fn new(visible_columns: ColumnSelection) -> Self {
        Self {
            visible_columns,
            ..Self::default()
        }
    }

    pub fn current_budget(&self) -> Option<&MonthlyBudget> {
        let id = self.current_budget_id?;
        self.budgets.iter().find(|b| b.budget_id == id)
    }

    pub fn category(&self, category_id: i64) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }

    pub fn ledger(&self, category_id: i64) -> &[LedgerEntry] {
        self.entries.get(&category_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Category id owning `entry_id`, scanning every loaded ledger.
    pub fn owner_of(&self, entry_id: i64) -> Option<i64> {
        self.entries
            .iter()
            .find(|(_, list)| list.iter().any(|e| e.entry_id == entry_id))
            .map(|(category_id, _)| *category_id)
    }

    fn category_mut(&mut self, category_id: i64) -> Option<&mut CategoryStats> {
        self.categories.iter_mut().find(|c| c.category_id == category_id)
    }

    fn budget_mut(&mut self, budget_id: i64) -> Option<&mut MonthlyBudget> {
        self.budgets.iter_mut().find(|b| b.budget_id == budget_id)
    }

    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Loading => self.loading = true,
            StoreAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            StoreAction::DismissError => self.error = None,
            StoreAction::BudgetsLoaded(budgets) => {
                self.loading = false;
                self.budgets = budgets;
            }
            StoreAction::SortChanged(sort) => self.budget_sort = sort,
            StoreAction::BudgetSelected(budget_id) => {
                if self.current_budget_id != budget_id {
                    self.categories.clear();
                    self.entries.clear();
                }
                self.current_budget_id = budget_id;
            }
            StoreAction::BudgetRemoved(budget_id) => {
                self.budgets.retain(|b| b.budget_id != budget_id);
                if self.current_budget_id == Some(budget_id) {
                    self.current_budget_id = None;
                    self.categories.clear();
                    self.entries.clear();
                }
            }
            StoreAction::BudgetFinished { budget_id, finished_at } => {
                if let Some(budget) = self.budget_mut(budget_id) {
                    if budget.first_finished_at.is_none() {
                        budget.first_finished_at = Some(finished_at.clone());
                    }
                    budget.last_edited = finished_at.clone();
                    budget.finished_at = Some(finished_at);
                }
            }
            StoreAction::BudgetReopened { budget_id, edited_at } => {
                if let Some(budget) = self.budget_mut(budget_id) {
                    budget.finished_at = None;
                    budget.last_edited = edited_at;
                }
            }
            StoreAction::BudgetRenamed {
                budget_id,
                title,
                edited_at,
            } => {
                if let Some(budget) = self.budget_mut(budget_id) {
                    let title = title.trim().to_string();
                    budget.name = Some(title).filter(|t| !t.is_empty());
                    budget.last_edited = edited_at;
                }
            }
            StoreAction::CategoriesLoaded { budget_id, categories } => {
                self.loading = false;
                if self.current_budget_id.map_or(true, |id| id == budget_id) {
                    self.categories = categories;
                    // Fresh rows never include in-flight entries.
                    for pending in self.pending.values_mut() {
                        pending.applied = None;
                    }
                }
            }
            StoreAction::LedgerLoaded { category_id, entries } => {
                // Keep provisional rows the backend does not know about yet.
                let mut merged: Vec<LedgerEntry> = self
                    .ledger(category_id)
                    .iter()
                    .filter(|e| e.is_provisional() && self.pending.contains_key(&e.entry_id))
                    .cloned()
                    .collect();
                merged.extend(entries);
                self.entries.insert(category_id, merged);
            }
            StoreAction::Entry(transition) => self.apply_optimistic(transition),
            StoreAction::EntryUpdated(update) => {
                for list in self.entries.values_mut() {
                    if let Some(entry) = list.iter_mut().find(|e| e.entry_id == update.entry_id) {
                        entry.apply_update(&update);
                        break;
                    }
                }
            }
            StoreAction::EntryDeleted { entry_id } => {
                if let Some(category_id) = self.owner_of(entry_id) {
                    if let Some(list) = self.entries.get_mut(&category_id) {
                        list.retain(|e| e.entry_id != entry_id);
                    }
                    if let Some(category) = self.category_mut(category_id) {
                        category.entries_count = category.entries_count.saturating_sub(1);
                    }
                }
            }
            StoreAction::AllocationSet { category_id, amount } => {
                if let Some(category) = self.category_mut(category_id) {
                    let shift = amount - category.allocated;
                    category.allocated = amount;
                    if shift != 0.0 {
                        category.remaining += shift;
                    }
                }
            }
            StoreAction::CategoryAdded(category) => {
                if self.category(category.category_id).is_none() {
                    self.categories.push(category);
                }
            }
            StoreAction::ColumnsChanged(selection) => self.visible_columns = selection,
        }
    }

    fn apply_optimistic(&mut self, transition: Optimistic) {
        match transition {
            Optimistic::Pending {
                temp_id,
                entry,
                created_at,
            } => {
                let delta = entry.net_delta();
                let category_id = entry.category_id;
                let applied = self.category_mut(category_id).map(|category| {
                    let before = snapshot(category);
                    category.net += delta;
                    category.remaining += delta;
                    category.entries_count += 1;
                    (before, snapshot(category))
                });
                let provisional = optimistic::provisional_entry(temp_id, &entry, &created_at);
                self.entries.entry(category_id).or_default().insert(0, provisional);
                self.pending.insert(
                    temp_id,
                    PendingEntry {
                        category_id,
                        delta,
                        applied,
                    },
                );
            }
            Optimistic::Committed { temp_id, entry } => {
                let category_id = self
                    .pending
                    .remove(&temp_id)
                    .map(|p| p.category_id)
                    .unwrap_or(entry.category_id);
                let list = self.entries.entry(category_id).or_default();
                match list.iter().position(|e| e.entry_id == temp_id) {
                    Some(index) => list[index] = entry,
                    None if !list.iter().any(|e| e.entry_id == entry.entry_id) => list.insert(0, entry),
                    None => {}
                }
            }
            Optimistic::RolledBack { temp_id, error } => {
                if let Some(pending) = self.pending.remove(&temp_id) {
                    if let Some(list) = self.entries.get_mut(&pending.category_id) {
                        list.retain(|e| e.entry_id != temp_id);
                    }
                    if let (Some((before, after)), Some(category)) =
                        (pending.applied, self.category_mut(pending.category_id))
                    {
                        if snapshot(category) == after {
                            restore(category, before);
                        } else {
                            category.net -= pending.delta;
                            category.remaining -= pending.delta;
                            category.entries_count = category.entries_count.saturating_sub(1);
                        }
                    }
                }
                self.error = Some(error);
            }
        }
    }
}

fn snapshot(category: &CategoryStats) -> StatsSnapshot {
    StatsSnapshot {
        net: category.net,
        remaining: category.remaining,
        entries_count: category.entries_count,
    }
}

fn restore(category: &mut CategoryStats, snapshot: StatsSnapshot) {
    category.net = snapshot.net;
    category.remaining = snapshot.remaining;
    category.entries_count = snapshot.entries_count;
}

impl Reducible for BudgetStore {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: StoreAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Where async operations send actions and read current state.
pub trait StoreDispatch {
    fn dispatch(&self, action: StoreAction);
    fn read<R>(&self, f: impl FnOnce(&BudgetStore) -> R) -> R;
}

impl StoreDispatch for RefCell<BudgetStore> {
    fn dispatch(&self, action: StoreAction) {
        self.borrow_mut().apply(action);
    }

    fn read<R>(&self, f: impl FnOnce(&BudgetStore) -> R) -> R {
        f(&self.borrow())
    }
}

/// A reducer handle reads the state it was rendered with, so operations read
/// once up front and pass values along explicitly.
impl StoreDispatch for UseReducerHandle<BudgetStore> {
    fn dispatch(&self, action: StoreAction) {
        UseReducerHandle::dispatch(self, action);
    }

    fn read<R>(&self, f: impl FnOnce(&BudgetStore) -> R) -> R {
        f(self)
    }
}

impl<S: StoreDispatch> StoreDispatch for Rc<S> {
    fn dispatch(&self, action: StoreAction) {
        (**self).dispatch(action);
    }

    fn read<R>(&self, f: impl FnOnce(&BudgetStore) -> R) -> R {
        (**self).read(f)
    }
}
