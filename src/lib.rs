//! Budget manager front-end: a Yew app that mirrors a desktop backend's
//! budgets, categories and ledgers and talks to it over Tauri `invoke`.

pub mod backend;
pub mod catalog;
pub mod columns;
pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod sorting;
pub mod store;
pub mod timezone;
pub mod ui;
pub mod validation;

pub use crate::backend::{Backend, Command, TauriBackend};
pub use crate::error::{AppError, BackendError, Result};
pub use crate::store::{BudgetStore, StoreAction, StoreDispatch};
pub use crate::timezone::TimezoneContext;
