use chrono::{Datelike, Utc};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::detail::BudgetDetail;
use super::icons::*;
use super::{confirm, error_banner, input_value, select_value, use_timezone, StoreHandle};
use crate::backend::TauriBackend;
use crate::error::FieldErrors;
use crate::format::{format_currency, month_name};
use crate::model::BudgetDraft;
use crate::sorting::{BudgetSort, SortCriteria};
use crate::store::ops;
use crate::validation::MAX_BUDGET_NAME_LEN;

#[derive(Properties, PartialEq)]
pub struct BudgetsPageProps {
    pub store: StoreHandle,
}

#[function_component(BudgetsPage)]
pub fn budgets_page(props: &BudgetsPageProps) -> Html {
    let show_create = use_state(|| false);

    let open_create = {
        let show_create = show_create.clone();
        Callback::from(move |_| show_create.set(true))
    };
    let close_create = {
        let show_create = show_create.clone();
        Callback::from(move |_| show_create.set(false))
    };

    if let Some(budget) = props.store.current_budget().cloned() {
        return html! { <BudgetDetail store={props.store.clone()} budget={budget} /> };
    }

    html! {
        <>
            <BudgetList store={props.store.clone()} on_create={open_create} />
            if *show_create {
                <CreateBudgetForm store={props.store.clone()} on_close={close_create} />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct BudgetListProps {
    store: StoreHandle,
    on_create: Callback<()>,
}

#[function_component(BudgetList)]
fn budget_list(props: &BudgetListProps) -> Html {
    let tz = use_timezone();
    let store = props.store.clone();
    let current_sort = store.budget_sort;

    let on_sort = {
        let store = store.clone();
        Callback::from(move |criteria: SortCriteria| {
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::change_budget_sort(&TauriBackend, &store, criteria).await;
            });
        })
    };
    let on_clear_sort = {
        let store = store.clone();
        Callback::from(move |_| {
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::clear_budget_sort(&TauriBackend, &store).await;
            });
        })
    };
    let on_dismiss = {
        let store = store.clone();
        Callback::from(move |_| ops::dismiss_error(&store))
    };
    let on_create = {
        let on_create = props.on_create.clone();
        Callback::from(move |_| on_create.emit(()))
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-col space-y-4">
                <div class="flex flex-col sm:flex-row justify-between items-start sm:items-center gap-4">
                    <h2 class="text-3xl font-bold text-slate-900">{"Monthly Budgets"}</h2>
                    <button onclick={on_create.clone()} class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 shadow-sm flex items-center gap-2">
                        { icon_plus() }{"Create Budget"}
                    </button>
                </div>

                <div class="flex flex-wrap items-center gap-2">
                    <span class="text-sm font-medium text-slate-700">{"Sort by:"}</span>
                    <button onclick={on_clear_sort} class="flex items-center gap-1 px-3 py-2 text-sm rounded-lg transition-colors duration-200 bg-slate-100 text-slate-700 hover:bg-slate-200">
                        {"Clear Sort"}{ icon_x() }
                    </button>
                    { for SortCriteria::ALL.iter().map(|criteria| {
                        let criteria = *criteria;
                        let indicator = BudgetSort::indicator(current_sort, criteria);
                        let class_name = if indicator.is_some() {
                            "flex items-center gap-1 px-3 py-2 text-sm rounded-lg transition-colors duration-200 disabled:opacity-50 bg-blue-100 text-blue-700 border border-blue-200"
                        } else {
                            "flex items-center gap-1 px-3 py-2 text-sm rounded-lg transition-colors duration-200 disabled:opacity-50 bg-slate-100 text-slate-700 hover:bg-slate-200"
                        };
                        let on_sort = on_sort.clone();
                        html! {
                            <button class={class_name} disabled={store.loading} onclick={Callback::from(move |_| on_sort.emit(criteria))}>
                                { criteria.label() }
                                {
                                    match indicator {
                                        Some(arrow) => html! { <span class="ml-1">{ arrow }</span> },
                                        None => html! { <span class="ml-1 text-slate-400">{ icon_arrow_up_down() }</span> },
                                    }
                                }
                            </button>
                        }
                    }) }
                </div>
            </div>

            if let Some(message) = &store.error {
                { error_banner(message, on_dismiss) }
            }

            if store.budgets.is_empty() {
                <div class="bg-white rounded-lg border border-slate-200 p-8 text-center">
                    <div class="w-16 h-16 bg-slate-100 rounded-full flex items-center justify-center mx-auto mb-4 text-slate-400">{ icon_calendar() }</div>
                    <h3 class="text-lg font-medium text-slate-900 mb-2">{ if store.loading { "Loading budgets..." } else { "No budgets found" } }</h3>
                    <p class="text-slate-600 mb-6">{"Get started by creating your first budget."}</p>
                    <button onclick={on_create} class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 shadow-sm">
                        {"Create Your First Budget"}
                    </button>
                </div>
            } else {
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    { for store.budgets.iter().map(|budget| {
                        let budget_id = budget.budget_id;
                        let on_open = {
                            let store = store.clone();
                            Callback::from(move |_| {
                                let store = store.clone();
                                spawn_local(async move {
                                    let _ = ops::select_budget(&TauriBackend, &store, Some(budget_id)).await;
                                });
                            })
                        };
                        let on_delete = {
                            let store = store.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.stop_propagation();
                                if !confirm("Are you sure you want to delete this budget?") {
                                    return;
                                }
                                let store = store.clone();
                                spawn_local(async move {
                                    let _ = ops::delete_budget(&TauriBackend, &store, budget_id).await;
                                });
                            })
                        };
                        html! {
                            <div key={budget_id} class="bg-white rounded-lg border border-slate-200 p-6 hover:shadow-lg hover:border-blue-200 transition-all duration-200 group cursor-pointer" onclick={on_open}>
                                <div class="flex items-start justify-between mb-4">
                                    <div class="flex items-center">
                                        <div class="w-12 h-12 bg-blue-100 rounded-lg flex items-center justify-center mr-3 text-blue-600">{ icon_calendar() }</div>
                                        <div>
                                            <h3 class="text-lg font-semibold text-slate-900 group-hover:text-blue-700">{ budget.display_name() }</h3>
                                            <p class="text-sm text-slate-600">{ format!("Budget #{}", budget_id) }</p>
                                        </div>
                                    </div>
                                    <button onclick={on_delete} title="Delete Budget" class="p-2 text-slate-400 hover:text-red-600 hover:bg-red-50 rounded-lg transition-colors duration-200">
                                        { icon_trash() }
                                    </button>
                                </div>
                                <div class="flex items-center justify-between">
                                    <span class="text-sm font-medium text-slate-700">{"Total Income"}</span>
                                    <span class="text-lg font-bold text-green-600">{ format_currency(budget.total_income) }</span>
                                </div>
                                <div class="pt-2 mt-3 border-t border-slate-100 space-y-1 text-xs text-slate-500">
                                    <div class="flex justify-between"><span>{"Created:"}</span><span>{ tz.format(&budget.created_at).date }</span></div>
                                    <div class="flex justify-between"><span>{"For:"}</span><span>{ budget.period_label() }</span></div>
                                    if let Some(finished_at) = &budget.finished_at {
                                        <div class="flex justify-between"><span>{"Finished:"}</span><span>{ tz.format(finished_at).date }</span></div>
                                    }
                                </div>
                            </div>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateBudgetFormProps {
    store: StoreHandle,
    on_close: Callback<()>,
}

#[function_component(CreateBudgetForm)]
fn create_budget_form(props: &CreateBudgetFormProps) -> Html {
    let tz = use_timezone();
    let today = tz.today(Utc::now());
    let month = use_state(|| today.month());
    let year = use_state(|| today.year().to_string());
    let name = use_state(String::new);
    let income = use_state(String::new);
    let errors = use_state(FieldErrors::new);
    let saving = use_state(|| false);

    let on_submit = {
        let store = props.store.clone();
        let on_close = props.on_close.clone();
        let month = month.clone();
        let year = year.clone();
        let name = name.clone();
        let income = income.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = BudgetDraft {
                month: *month,
                year: year.trim().parse().unwrap_or(0),
                total_income: crate::format::parse_amount(&income).unwrap_or(0.0),
                name: Some((*name).clone()),
            };
            let store = store.clone();
            let on_close = on_close.clone();
            let errors = errors.clone();
            let saving = saving.clone();
            saving.set(true);
            spawn_local(async move {
                match ops::create_budget(&TauriBackend, &store, draft).await {
                    Ok(_) => {
                        errors.set(FieldErrors::new());
                        on_close.emit(());
                    }
                    Err(err) => {
                        if let Some(field_errors) = err.field_errors() {
                            errors.set(field_errors.clone());
                        }
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let period = format!("{} {}", month_name(*month), *year);
    let field_error = |field: &str| match errors.get(field) {
        Some(message) => html! { <p class="mt-1 text-sm text-red-600">{ message.to_string() }</p> },
        None => html! {},
    };
    let input_class = "w-full px-4 py-3 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-blue-500 transition-colors duration-200";

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6 space-y-6">
                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold text-slate-900">{"Create New Budget"}</h2>
                    <button onclick={on_cancel.clone()} class="p-2 rounded-md text-slate-600 hover:text-slate-900 hover:bg-slate-100">{ icon_x() }</button>
                </div>

                <div class="bg-blue-50 border border-blue-200 rounded-lg p-4 text-sm text-blue-700">
                    { format!("Create a budget for {}.", period) }
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="grid grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm font-medium text-slate-700 mb-2">{"Month"}</label>
                            <select
                                class={input_class}
                                onchange={{
                                    let month = month.clone();
                                    Callback::from(move |e: Event| {
                                        if let Ok(value) = select_value(&e).parse::<u32>() {
                                            month.set(value);
                                        }
                                    })
                                }}
                            >
                                { for (1..=12u32).map(|m| html! {
                                    <option value={m.to_string()} selected={m == *month}>{ month_name(m) }</option>
                                }) }
                            </select>
                            { field_error("month") }
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-slate-700 mb-2">{"Year"}</label>
                            <input
                                type="number"
                                min="1900"
                                max="2100"
                                class={input_class}
                                value={(*year).clone()}
                                oninput={{
                                    let year = year.clone();
                                    Callback::from(move |e: InputEvent| year.set(input_value(&e)))
                                }}
                            />
                            { field_error("year") }
                        </div>
                    </div>

                    <div>
                        <label class="block text-sm font-medium text-slate-700 mb-2">{"Budget Name (Optional)"}</label>
                        <input
                            type="text"
                            class={input_class}
                            placeholder={format!("{} Budget", period)}
                            maxlength={MAX_BUDGET_NAME_LEN.to_string()}
                            value={(*name).clone()}
                            oninput={{
                                let name = name.clone();
                                Callback::from(move |e: InputEvent| name.set(input_value(&e)))
                            }}
                        />
                        <p class="mt-1 text-sm text-slate-500">{"Leave empty to use default name"}</p>
                        { field_error("name") }
                    </div>

                    <div>
                        <label class="block text-sm font-medium text-slate-700 mb-2">{"Total Monthly Income"}</label>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            class={input_class}
                            placeholder="Enter your total income"
                            value={(*income).clone()}
                            oninput={{
                                let income = income.clone();
                                Callback::from(move |e: InputEvent| income.set(input_value(&e)))
                            }}
                        />
                        { field_error("total_income") }
                    </div>

                    if let Some(message) = &props.store.error {
                        <div class="text-sm text-red-600">{ message.clone() }</div>
                    }

                    <div class="flex justify-end gap-3">
                        <button type="button" onclick={on_cancel} class="px-4 py-2 rounded-lg border border-slate-300 text-slate-700 hover:bg-slate-50">{"Cancel"}</button>
                        <button type="submit" disabled={*saving} class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 disabled:opacity-50">
                            { if *saving { "Creating..." } else { "Create Budget" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
