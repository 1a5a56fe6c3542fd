use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::categories::{CategoryGrid, NewCategoryForm};
use super::icons::*;
use super::{confirm, error_banner, input_value, select_value, use_timezone, StoreHandle};
use crate::backend::commands::GetBudgetChangeHistory;
use crate::backend::{Backend, TauriBackend};
use crate::catalog::{self, Loaded};
use crate::error::FieldErrors;
use crate::format::format_currency;
use crate::history::{action_label, old_new_values};
use crate::model::{BudgetChangeHistoryEntry, BudgetTemplate, MonthlyBudget};
use crate::store::ops;
use crate::validation::MAX_BUDGET_NAME_LEN;

#[derive(Properties, PartialEq)]
pub struct BudgetDetailProps {
    pub store: StoreHandle,
    pub budget: MonthlyBudget,
}

#[function_component(BudgetDetail)]
pub fn budget_detail(props: &BudgetDetailProps) -> Html {
    let tz = use_timezone();
    let editing_title = use_state(|| false);
    let title_draft = use_state(String::new);
    let title_errors = use_state(FieldErrors::new);
    let show_history = use_state(|| false);
    let store = props.store.clone();
    let budget = &props.budget;
    let budget_id = budget.budget_id;

    let on_back = {
        let store = store.clone();
        Callback::from(move |_| {
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::select_budget(&TauriBackend, &store, None).await;
            });
        })
    };

    let on_toggle_finished = {
        let store = store.clone();
        let finished = budget.is_finished();
        Callback::from(move |_| {
            let store = store.clone();
            spawn_local(async move {
                let _ = if finished {
                    ops::reopen_budget(&TauriBackend, &store, budget_id).await
                } else {
                    ops::finish_budget(&TauriBackend, &store, budget_id).await
                };
            });
        })
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |_| {
            if !confirm("Are you sure you want to delete this budget? This cannot be undone.") {
                return;
            }
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::delete_budget(&TauriBackend, &store, budget_id).await;
            });
        })
    };

    let on_start_rename = {
        let editing_title = editing_title.clone();
        let title_draft = title_draft.clone();
        let title_errors = title_errors.clone();
        let current = budget.name.clone().unwrap_or_default();
        Callback::from(move |_| {
            title_draft.set(current.clone());
            title_errors.set(FieldErrors::new());
            editing_title.set(true);
        })
    };

    let save_title = {
        let store = store.clone();
        let editing_title = editing_title.clone();
        let title_draft = title_draft.clone();
        let title_errors = title_errors.clone();
        Callback::from(move |_: ()| {
            let store = store.clone();
            let editing_title = editing_title.clone();
            let title_errors = title_errors.clone();
            let title = (*title_draft).clone();
            spawn_local(async move {
                match ops::rename_budget(&TauriBackend, &store, budget_id, &title).await {
                    Ok(()) => {
                        title_errors.set(FieldErrors::new());
                        editing_title.set(false);
                    }
                    Err(err) => {
                        if let Some(field_errors) = err.field_errors() {
                            title_errors.set(field_errors.clone());
                        }
                    }
                }
            });
        })
    };

    let on_title_key = {
        let save_title = save_title.clone();
        let editing_title = editing_title.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => save_title.emit(()),
            "Escape" => editing_title.set(false),
            _ => {}
        })
    };

    let on_toggle_history = {
        let show_history = show_history.clone();
        Callback::from(move |_| show_history.set(!*show_history))
    };

    let on_dismiss = {
        let store = store.clone();
        Callback::from(move |_| ops::dismiss_error(&store))
    };

    let allocated: f64 = store.categories.iter().map(|c| c.allocated).sum();
    let unallocated = budget.total_income - allocated;

    html! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row justify-between items-start sm:items-center gap-4">
                <div class="flex items-center gap-3">
                    <button onclick={on_back} class="p-2 rounded-md text-slate-600 hover:text-slate-900 hover:bg-slate-100" title="Back to budgets">
                        { icon_arrow_left() }
                    </button>
                    if *editing_title {
                        <div>
                            <div class="flex items-center gap-2">
                                <input
                                    type="text"
                                    class="px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                                    placeholder={budget.period_label()}
                                    maxlength={MAX_BUDGET_NAME_LEN.to_string()}
                                    value={(*title_draft).clone()}
                                    oninput={{
                                        let title_draft = title_draft.clone();
                                        Callback::from(move |e: InputEvent| title_draft.set(input_value(&e)))
                                    }}
                                    onkeydown={on_title_key}
                                />
                                <button onclick={Callback::from(move |_| save_title.emit(()))} class="p-2 text-green-600 hover:bg-green-50 rounded-lg">{ icon_check() }</button>
                                <button
                                    onclick={{
                                        let editing_title = editing_title.clone();
                                        Callback::from(move |_| editing_title.set(false))
                                    }}
                                    class="p-2 text-slate-500 hover:bg-slate-100 rounded-lg"
                                >
                                    { icon_x() }
                                </button>
                            </div>
                            if let Some(message) = title_errors.get("name") {
                                <p class="mt-1 text-xs text-red-600">{ message.to_string() }</p>
                            }
                        </div>
                    } else {
                        <div>
                            <h2 class="text-3xl font-bold text-slate-900 flex items-center gap-2">
                                { budget.display_name() }
                                <button onclick={on_start_rename} title="Rename budget" class="p-1 text-slate-400 hover:text-blue-600">{ icon_edit() }</button>
                            </h2>
                            <p class="text-sm text-slate-600">
                                { budget.period_label() }
                                if let Some(finished_at) = &budget.finished_at {
                                    <span class="ml-2 inline-flex items-center px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-700">
                                        { format!("Finished {}", tz.format(finished_at).date) }
                                    </span>
                                }
                            </p>
                        </div>
                    }
                </div>
                <div class="flex items-center gap-2">
                    <button onclick={on_toggle_history} class="flex items-center gap-1 px-3 py-2 text-sm rounded-lg bg-slate-100 text-slate-700 hover:bg-slate-200">
                        { icon_clock() }{ if *show_history { "Hide History" } else { "History" } }
                    </button>
                    <button onclick={on_toggle_finished} class="flex items-center gap-1 px-3 py-2 text-sm rounded-lg bg-green-100 text-green-700 hover:bg-green-200">
                        { icon_check() }{ if budget.is_finished() { "Reopen Budget" } else { "Finish Budget" } }
                    </button>
                    <button onclick={on_delete} title="Delete Budget" class="p-2 text-slate-400 hover:text-red-600 hover:bg-red-50 rounded-lg">
                        { icon_trash() }
                    </button>
                </div>
            </div>

            if let Some(message) = &store.error {
                { error_banner(message, on_dismiss) }
            }

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <SummaryCard label="Total Income" value={format_currency(budget.total_income)} tone="text-green-600" />
                <SummaryCard label="Allocated" value={format_currency(allocated)} tone="text-slate-900" />
                <SummaryCard
                    label="Unallocated"
                    value={format_currency(unallocated)}
                    tone={if unallocated < 0.0 { "text-red-600" } else { "text-blue-600" }}
                />
            </div>

            if *show_history {
                <ChangeHistory budget_id={budget_id} />
            }

            <TemplateSelector store={store.clone()} budget_id={budget_id} />
            <CategoryGrid store={store.clone()} budget_id={budget_id} />
            <NewCategoryForm store={store.clone()} budget_id={budget_id} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryCardProps {
    label: &'static str,
    value: String,
    tone: &'static str,
}

#[function_component(SummaryCard)]
fn summary_card(props: &SummaryCardProps) -> Html {
    html! {
        <div class="bg-white rounded-lg border border-slate-200 p-4">
            <p class="text-sm font-medium text-slate-600">{ props.label }</p>
            <p class={classes!("text-2xl", "font-bold", props.tone)}>{ props.value.clone() }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ChangeHistoryProps {
    budget_id: i64,
}

#[function_component(ChangeHistory)]
fn change_history(props: &ChangeHistoryProps) -> Html {
    let tz = use_timezone();
    let entries = use_state(|| None::<Vec<BudgetChangeHistoryEntry>>);
    let error = use_state(|| None::<String>);

    {
        let entries = entries.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |budget_id: &i64| {
                let budget_id = *budget_id;
                spawn_local(async move {
                    match TauriBackend.call(&GetBudgetChangeHistory { budget_id }).await {
                        Ok(list) => entries.set(Some(list)),
                        Err(err) => {
                            tracing::error!(budget_id, error = %err, "failed to load change history");
                            error.set(Some(err.to_string()));
                        }
                    }
                });
                || ()
            },
            props.budget_id,
        );
    }

    let body = match (&*entries, &*error) {
        (_, Some(message)) => html! { <p class="text-sm text-red-600">{ message.clone() }</p> },
        (None, None) => html! { <p class="text-sm text-slate-500">{"Loading history..."}</p> },
        (Some(list), None) if list.is_empty() => html! { <p class="text-sm text-slate-500">{"No changes recorded yet."}</p> },
        (Some(list), None) => html! {
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-slate-600 border-b border-slate-200">
                        <th class="py-2 pr-4">{"When"}</th>
                        <th class="py-2 pr-4">{"Action"}</th>
                        <th class="py-2 pr-4">{"Old"}</th>
                        <th class="py-2 pr-4">{"New"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for list.iter().map(|entry| {
                        let when = tz.format(&entry.changed_at);
                        let (old_value, new_value) = old_new_values(entry);
                        html! {
                            <tr key={entry.change_id} class="border-b border-slate-100">
                                <td class="py-2 pr-4 whitespace-nowrap">{ format!("{} {}", when.date, when.time) }</td>
                                <td class="py-2 pr-4" title={entry.change_description.clone()}>{ action_label(entry) }</td>
                                <td class="py-2 pr-4 text-slate-500">{ old_value }</td>
                                <td class="py-2 pr-4">{ new_value }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        },
    };

    html! {
        <div class="bg-white rounded-lg border border-slate-200 p-6">
            <h3 class="text-lg font-semibold text-slate-900 mb-4 flex items-center gap-2">{ icon_clock() }{"Change History"}</h3>
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TemplateSelectorProps {
    store: StoreHandle,
    budget_id: i64,
}

#[function_component(TemplateSelector)]
fn template_selector(props: &TemplateSelectorProps) -> Html {
    let templates = use_state(Vec::<BudgetTemplate>::new);
    let selected = use_state(|| None::<i64>);
    let applying = use_state(|| false);

    {
        let templates = templates.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_templates(&TauriBackend).await {
                        Ok(Loaded::Ready(list)) => templates.set(list),
                        Ok(Loaded::NeedsMigration) => {}
                        Err(err) => tracing::warn!(error = %err, "templates unavailable"),
                    }
                });
                || ()
            },
            (),
        );
    }

    if templates.is_empty() {
        return html! {};
    }

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |e: Event| selected.set(select_value(&e).parse().ok()))
    };

    let on_apply = {
        let store = props.store.clone();
        let budget_id = props.budget_id;
        let selected = selected.clone();
        let applying = applying.clone();
        Callback::from(move |_| {
            let Some(template_id) = *selected else {
                return;
            };
            if !confirm("Applying a template replaces this budget's categories. Continue?") {
                return;
            }
            let store = store.clone();
            let applying = applying.clone();
            applying.set(true);
            spawn_local(async move {
                let _ = ops::apply_template(&TauriBackend, &store, budget_id, template_id).await;
                applying.set(false);
            });
        })
    };

    html! {
        <div class="bg-white rounded-lg border border-slate-200 p-4 flex flex-col sm:flex-row sm:items-center gap-3">
            <span class="flex items-center gap-2 text-sm font-medium text-slate-700">{ icon_bookmark() }{"Apply Template"}</span>
            <select class="flex-1 px-3 py-2 border border-slate-300 rounded-lg" onchange={on_select}>
                <option value="" selected={selected.is_none()}>{"Choose a template..."}</option>
                { for templates.iter().map(|template| html! {
                    <option value={template.template_id.to_string()} selected={*selected == Some(template.template_id)}>
                        { format!("{} ({} categories, {})", template.name, template.category_count, format_currency(template.total_amount)) }
                    </option>
                }) }
            </select>
            <button
                onclick={on_apply}
                disabled={selected.is_none() || *applying}
                class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 disabled:opacity-50"
            >
                { if *applying { "Applying..." } else { "Apply" } }
            </button>
        </div>
    }
}
