#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use budget_manager_frontend::backend::{decode_output, encode_args, Backend, Command};
use budget_manager_frontend::BackendError;
use serde_json::{json, Value};

type Hook = Box<dyn Fn(&str)>;

/// Scripted in-memory backend. Responses are queued per command name; a
/// command with nothing queued answers `null`, which decodes as `()`.
#[derive(Default)]
pub struct FakeBackend {
    responses: RefCell<HashMap<&'static str, VecDeque<Result<Value, BackendError>>>>,
    calls: RefCell<Vec<(String, Value)>>,
    hook: RefCell<Option<Hook>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &'static str, value: Value) -> &Self {
        self.responses
            .borrow_mut()
            .entry(command)
            .or_default()
            .push_back(Ok(value));
        self
    }

    pub fn fail(&self, command: &'static str, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .entry(command)
            .or_default()
            .push_back(Err(BackendError::from_message(message)));
        self
    }

    /// Run `hook` with the command name before each response is produced.
    pub fn on_call(&self, hook: impl Fn(&str) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn last_args(&self, command: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == command)
            .map(|(_, args)| args.clone())
    }
}

impl Backend for FakeBackend {
    async fn call<C: Command>(&self, command: &C) -> Result<C::Output, BackendError> {
        let args = encode_args(command)?;
        self.calls.borrow_mut().push((C::NAME.to_string(), args));
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(C::NAME);
        }
        let next = self
            .responses
            .borrow_mut()
            .get_mut(C::NAME)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(value)) => decode_output::<C>(value),
            Some(Err(err)) => Err(err),
            None => decode_output::<C>(Value::Null),
        }
    }
}

pub fn budget_json(budget_id: i64, month: u32, year: i32, name: Option<&str>) -> Value {
    json!({
        "budget_id": budget_id,
        "month": month,
        "year": year,
        "total_income": 5000.0,
        "created_at": "2025-01-01 09:00:00",
        "finished_at": null,
        "first_finished_at": null,
        "name": name,
        "last_edited": "2025-01-01 09:00:00"
    })
}

pub fn food_category_json() -> Value {
    json!({
        "category_id": 10,
        "budget_id": 1,
        "category_name": "Food",
        "allocated_amount": 300.0,
        "net_amount": -45.5,
        "remaining_amount": 254.5,
        "last_activity_at": "2025-03-04 18:30:00",
        "entries_count": 2
    })
}

pub fn ledger_row_json(entry_id: i64, entry_type: &str, amount: f64) -> Value {
    json!({
        "entry_id": entry_id,
        "category_id": 10,
        "entry_type": entry_type,
        "what": "Groceries",
        "where": "Market",
        "amount": amount,
        "date": "2025-03-05",
        "created_at": "2025-03-05 12:00:00"
    })
}
