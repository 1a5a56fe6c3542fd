mod common;

use std::cell::RefCell;
use std::rc::Rc;

use budget_manager_frontend::columns::{ColumnId, ColumnSelection};
use budget_manager_frontend::model::{BudgetDraft, CategoryStats, EntryType, NewCategory, NewEntry, UpdateEntry};
use budget_manager_frontend::prefs::{KeyValueStore, MemoryStore, VISIBLE_COLUMNS_KEY};
use budget_manager_frontend::sorting::{BudgetSort, LedgerSort, SortCriteria};
use budget_manager_frontend::store::ops;
use budget_manager_frontend::{BudgetStore, StoreAction, StoreDispatch};
use common::{budget_json, food_category_json, ledger_row_json, FakeBackend};
use serde_json::json;

fn store_with_food() -> Rc<RefCell<BudgetStore>> {
    let store = Rc::new(RefCell::new(BudgetStore::default()));
    let food: CategoryStats = serde_json::from_value(food_category_json()).unwrap();
    store.dispatch(StoreAction::BudgetSelected(Some(1)));
    store.dispatch(StoreAction::CategoriesLoaded {
        budget_id: 1,
        categories: vec![food],
    });
    store
}

fn lunch(amount: f64) -> NewEntry {
    NewEntry {
        category_id: 10,
        entry_type: EntryType::Expense,
        what: "Lunch".to_string(),
        place: Some("Cafe".to_string()),
        amount,
        date: "2025-03-05".to_string(),
    }
}

#[tokio::test]
async fn confirmed_entry_moves_stats_by_its_signed_amount() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("add_category_entry", ledger_row_json(501, "expense", 12.25));

    let confirmed = ops::add_entry(&backend, &store, lunch(12.25)).await.unwrap();

    assert_eq!(confirmed.entry_id, 501);
    let state = store.borrow();
    let food = state.category(10).unwrap();
    assert_eq!(food.net, -57.75);
    assert_eq!(food.remaining, 242.25);
    assert_eq!(food.entries_count, 3);
    assert_eq!(state.ledger(10)[0].entry_id, 501);
    assert!(state.pending.is_empty());

    let args = backend.last_args("add_category_entry").unwrap();
    assert_eq!(args["payload"]["categoryId"], json!(10));
    assert_eq!(args["payload"]["entryType"], json!("expense"));
    assert_eq!(args["payload"]["where"], json!("Cafe"));
}

#[tokio::test]
async fn rejected_entry_restores_stats_exactly() {
    let store = store_with_food();
    let before = store.borrow().category(10).cloned().unwrap();
    let backend = FakeBackend::new();
    backend.fail("add_category_entry", "database is locked");

    let err = ops::add_entry(&backend, &store, lunch(0.1)).await.unwrap_err();

    assert!(err.to_string().contains("database is locked"));
    let state = store.borrow();
    assert_eq!(state.category(10), Some(&before));
    assert!(state.ledger(10).is_empty());
    assert!(state.pending.is_empty());
    assert_eq!(state.error.as_deref(), Some("database is locked"));
}

#[tokio::test]
async fn provisional_entry_is_visible_while_the_request_is_in_flight() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("add_category_entry", ledger_row_json(502, "income", 20.0));

    let seen = Rc::new(RefCell::new(None));
    {
        let store = store.clone();
        let seen = seen.clone();
        backend.on_call(move |command| {
            if command == "add_category_entry" {
                let state = store.borrow();
                let head = state.ledger(10).first().cloned();
                let net = state.category(10).map(|c| c.net);
                *seen.borrow_mut() = Some((head, net));
            }
        });
    }

    let mut income = lunch(20.0);
    income.entry_type = EntryType::Income;
    ops::add_entry(&backend, &store, income).await.unwrap();

    let (head, net) = seen.borrow().clone().unwrap();
    let head = head.unwrap();
    assert!(head.is_provisional());
    assert_eq!(head.what, "Lunch");
    assert_eq!(net, Some(-25.5));

    let state = store.borrow();
    assert_eq!(state.ledger(10).len(), 1);
    assert_eq!(state.ledger(10)[0].entry_id, 502);
}

#[tokio::test]
async fn invalid_entry_never_reaches_the_backend() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    let mut blank = lunch(0.0);
    blank.what = "  ".to_string();

    let err = ops::add_entry(&backend, &store, blank).await.unwrap_err();

    let fields = err.field_errors().unwrap();
    assert!(fields.get("what").is_some());
    assert!(fields.get("amount").is_some());
    assert!(backend.calls().is_empty());
    assert!(store.borrow().error.is_none());
}

#[tokio::test]
async fn setting_the_same_allocation_leaves_remaining_alone() {
    let store = store_with_food();
    let backend = FakeBackend::new();

    ops::set_allocated(&backend, &store, 10, 300.0).await.unwrap();
    assert_eq!(store.borrow().category(10).unwrap().remaining, 254.5);

    ops::set_allocated(&backend, &store, 10, 350.0).await.unwrap();
    let state = store.borrow();
    assert_eq!(state.category(10).unwrap().allocated, 350.0);
    assert_eq!(state.category(10).unwrap().remaining, 304.5);
    assert_eq!(
        backend.last_args("set_category_allocated_amount"),
        Some(json!({"categoryId": 10, "amount": 350.0}))
    );
}

#[tokio::test]
async fn negative_allocation_is_refused_locally() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    assert!(ops::set_allocated(&backend, &store, 10, -1.0).await.is_err());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn duplicate_month_is_rejected_before_any_call() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    backend.respond("list_monthly_budgets_sorted", json!([budget_json(1, 3, 2025, None)]));
    ops::load_budgets(&backend, &store).await.unwrap();

    let draft = BudgetDraft {
        month: 3,
        year: 2025,
        total_income: 4200.0,
        name: None,
    };
    let err = ops::create_budget(&backend, &store, draft).await.unwrap_err();

    let message = err.field_errors().and_then(|f| f.get("month")).unwrap();
    assert!(message.contains("already exists"), "{message}");
    assert_eq!(backend.call_names(), vec!["list_monthly_budgets_sorted"]);
}

#[tokio::test]
async fn created_budget_becomes_current() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    backend
        .respond("create_monthly_budget", json!(7))
        .respond("list_monthly_budgets_sorted", json!([budget_json(7, 4, 2025, Some("April"))]))
        .respond("get_budget_categories_with_stats", json!([]));

    let draft = BudgetDraft {
        month: 4,
        year: 2025,
        total_income: 4200.0,
        name: Some("  April  ".to_string()),
    };
    let budget_id = ops::create_budget(&backend, &store, draft).await.unwrap();

    assert_eq!(budget_id, 7);
    assert_eq!(store.borrow().current_budget_id, Some(7));
    assert_eq!(
        backend.last_args("create_monthly_budget"),
        Some(json!({"args": {"month": 4, "year": 2025, "totalIncome": 4200.0, "name": "April"}}))
    );
    assert_eq!(
        backend.call_names(),
        vec![
            "create_monthly_budget",
            "list_monthly_budgets_sorted",
            "get_budget_categories_with_stats"
        ]
    );
}

#[tokio::test]
async fn sort_cycles_and_clear_falls_back_to_budget_date() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    for _ in 0..3 {
        backend.respond("list_monthly_budgets_sorted", json!([]));
    }

    let first = ops::change_budget_sort(&backend, &store, SortCriteria::Name).await.unwrap();
    assert_eq!(first, BudgetSort::new(SortCriteria::Name, true));
    let second = ops::change_budget_sort(&backend, &store, SortCriteria::Name).await.unwrap();
    assert_eq!(second, BudgetSort::new(SortCriteria::Name, false));
    assert_eq!(store.borrow().budget_sort, Some(second));

    ops::clear_budget_sort(&backend, &store).await.unwrap();
    assert_eq!(store.borrow().budget_sort, None);
    assert_eq!(
        backend.last_args("list_monthly_budgets_sorted"),
        Some(json!({"args": {"criteria": "budget_date", "ascending": false}}))
    );
}

#[tokio::test]
async fn failed_load_keeps_the_previous_list_and_reports() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    backend
        .respond("list_monthly_budgets_sorted", json!([budget_json(1, 3, 2025, None)]))
        .fail("list_monthly_budgets_sorted", "connection lost");

    ops::load_budgets(&backend, &store).await.unwrap();
    assert!(ops::load_budgets(&backend, &store).await.is_err());

    let state = store.borrow();
    assert_eq!(state.budgets.len(), 1);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("connection lost"));
}

#[tokio::test]
async fn ledger_fetch_sends_the_page_and_sort() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond(
        "get_category_ledger",
        json!([ledger_row_json(1, "expense", 20.0), ledger_row_json(2, "income", 5.0)]),
    );

    ops::fetch_ledger(&backend, &store, 10, LedgerSort::AmountAsc).await.unwrap();

    assert_eq!(store.borrow().ledger(10).len(), 2);
    assert_eq!(
        backend.last_args("get_category_ledger"),
        Some(json!({"categoryId": 10, "limit": 50, "offset": 0, "sort": "amount_asc"}))
    );
}

#[tokio::test]
async fn deleting_an_entry_drops_it_and_its_count() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("get_category_ledger", json!([ledger_row_json(1, "expense", 20.0)]));
    ops::fetch_ledger(&backend, &store, 10, LedgerSort::default()).await.unwrap();

    ops::delete_entry(&backend, &store, 1).await.unwrap();

    let state = store.borrow();
    assert!(state.ledger(10).is_empty());
    assert_eq!(state.category(10).unwrap().entries_count, 1);
}

#[tokio::test]
async fn finishing_and_renaming_update_the_loaded_budget() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    backend.respond("list_monthly_budgets_sorted", json!([budget_json(1, 3, 2025, None)]));
    ops::load_budgets(&backend, &store).await.unwrap();

    ops::finish_budget(&backend, &store, 1).await.unwrap();
    ops::rename_budget(&backend, &store, 1, "  Spring  ").await.unwrap();

    let state = store.borrow();
    let budget = &state.budgets[0];
    assert!(budget.is_finished());
    assert_eq!(budget.display_name(), "Spring");
    assert_eq!(
        backend.last_args("update_budget_title"),
        Some(json!({"budgetId": 1, "title": "Spring"}))
    );

    drop(state);
    ops::reopen_budget(&backend, &store, 1).await.unwrap();
    assert!(!store.borrow().budgets[0].is_finished());
}

#[tokio::test]
async fn setting_columns_twice_persists_the_same_value() {
    let store = RefCell::new(BudgetStore::default());
    let prefs = MemoryStore::new();
    let selection = ColumnSelection::new([ColumnId::Net, ColumnId::Entries]);

    ops::set_visible_columns(&store, &prefs, selection.clone()).unwrap();
    let first = prefs.get(VISIBLE_COLUMNS_KEY).unwrap();
    ops::set_visible_columns(&store, &prefs, selection.clone()).unwrap();
    let second = prefs.get(VISIBLE_COLUMNS_KEY).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, r#"["net","entries"]"#);
    assert_eq!(store.borrow().visible_columns, selection);
    assert_eq!(ColumnSelection::load(&prefs), selection);
}

#[tokio::test]
async fn updated_entry_is_replaced_without_touching_aggregates() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("get_category_ledger", json!([ledger_row_json(1, "expense", 20.0)]));
    ops::fetch_ledger(&backend, &store, 10, LedgerSort::default()).await.unwrap();
    let before = store.borrow().category(10).cloned().unwrap();

    let mut update = UpdateEntry::from_entry(&store.borrow().ledger(10)[0]);
    update.amount = 35.0;
    update.what = "Weekly shop".to_string();
    ops::update_entry(&backend, &store, update).await.unwrap();

    let state = store.borrow();
    assert_eq!(state.ledger(10)[0].amount, 35.0);
    assert_eq!(state.ledger(10)[0].what, "Weekly shop");
    assert_eq!(state.category(10), Some(&before));
    assert_eq!(
        backend.last_args("update_category_entry").unwrap()["payload"]["entryId"],
        json!(1)
    );
}

#[tokio::test]
async fn added_category_starts_with_full_remaining() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("add_budget_category", json!(11));

    let category = NewCategory {
        budget_id: 1,
        category_name: " Travel ".to_string(),
        allocated_amount: 120.0,
    };
    let category_id = ops::add_category(&backend, &store, category).await.unwrap();

    assert_eq!(category_id, 11);
    let state = store.borrow();
    let travel = state.category(11).unwrap();
    assert_eq!(travel.name, "Travel");
    assert_eq!(travel.net, 0.0);
    assert_eq!(travel.remaining, 120.0);
    assert_eq!(travel.entries_count, 0);
}

#[tokio::test]
async fn reopening_and_renaming_bump_last_edited() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    backend.respond("list_monthly_budgets_sorted", json!([budget_json(1, 3, 2025, None)]));
    ops::load_budgets(&backend, &store).await.unwrap();
    let loaded = store.borrow().budgets[0].last_edited.clone();
    assert_eq!(loaded, "2025-01-01 09:00:00");

    ops::reopen_budget(&backend, &store, 1).await.unwrap();
    let after_reopen = store.borrow().budgets[0].last_edited.clone();
    assert_ne!(after_reopen, loaded);

    store.borrow_mut().budgets[0].last_edited = loaded.clone();
    ops::rename_budget(&backend, &store, 1, "Spring").await.unwrap();
    assert_ne!(store.borrow().budgets[0].last_edited, loaded);
}

#[tokio::test]
async fn overlong_budget_name_is_a_field_error() {
    let store = RefCell::new(BudgetStore::default());
    let backend = FakeBackend::new();
    let title = "x".repeat(101);

    let err = ops::rename_budget(&backend, &store, 1, &title).await.unwrap_err();

    assert!(err.field_errors().and_then(|f| f.get("name")).is_some());
    assert!(backend.calls().is_empty());
    assert!(store.borrow().error.is_none());
}

#[tokio::test]
async fn failed_category_refresh_keeps_the_stale_rows() {
    let store = store_with_food();
    let before = store.borrow().categories.clone();
    let backend = FakeBackend::new();
    backend.fail("get_budget_categories_with_stats", "disk I/O error");

    assert!(ops::fetch_categories_with_stats(&backend, &store, 1).await.is_err());

    let state = store.borrow();
    assert_eq!(state.categories, before);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("disk I/O error"));
}

#[tokio::test]
async fn adjustment_entries_only_move_the_count() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    backend.respond("add_category_entry", ledger_row_json(503, "adjustment", 40.0));

    let mut correction = lunch(40.0);
    correction.entry_type = EntryType::Adjustment;
    ops::add_entry(&backend, &store, correction).await.unwrap();

    let state = store.borrow();
    let food = state.category(10).unwrap();
    assert_eq!(food.net, -45.5);
    assert_eq!(food.remaining, 254.5);
    assert_eq!(food.entries_count, 3);
    assert_eq!(state.ledger(10)[0].entry_id, 503);
}

#[tokio::test]
async fn applying_a_template_reloads_the_categories() {
    let store = store_with_food();
    let backend = FakeBackend::new();
    let mut rent = food_category_json();
    rent["category_id"] = json!(12);
    rent["category_name"] = json!("Rent");
    backend
        .respond("apply_template_to_budget", json!(null))
        .respond("get_budget_categories_with_stats", json!([food_category_json(), rent]));

    ops::apply_template(&backend, &store, 1, 3).await.unwrap();

    assert_eq!(
        backend.call_names(),
        vec!["apply_template_to_budget", "get_budget_categories_with_stats"]
    );
    assert_eq!(
        backend.last_args("apply_template_to_budget"),
        Some(json!({"budgetId": 1, "templateId": 3}))
    );
    let state = store.borrow();
    assert_eq!(state.categories.len(), 2);
    assert_eq!(state.category(12).unwrap().name, "Rent");
}
