use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::*;
use super::ledger::LedgerModal;
use super::{input_value, use_timezone, StoreHandle};
use crate::backend::TauriBackend;
use crate::columns::{Align, ColumnId, ColumnSelection, PRESETS};
use crate::error::FieldErrors;
use crate::format::{format_currency, format_last_activity, format_signed_currency, parse_amount};
use crate::model::{CategoryStats, NewCategory};
use crate::prefs::BrowserStorage;
use crate::store::ops;
use crate::timezone::TimezoneContext;

#[derive(Properties, PartialEq)]
pub struct CategoryGridProps {
    pub store: StoreHandle,
    pub budget_id: i64,
}

#[function_component(CategoryGrid)]
pub fn category_grid(props: &CategoryGridProps) -> Html {
    let tz = use_timezone();
    let editing = use_state(|| None::<(i64, String)>);
    let ledger_for = use_state(|| None::<i64>);
    let show_columns = use_state(|| false);
    let store = props.store.clone();
    let visible: Vec<ColumnId> = ColumnId::ALL
        .into_iter()
        .filter(|id| store.visible_columns.contains(*id))
        .collect();

    let on_refresh = {
        let store = store.clone();
        let budget_id = props.budget_id;
        Callback::from(move |_| {
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::fetch_categories_with_stats(&TauriBackend, &store, budget_id).await;
            });
        })
    };

    let save_allocation = {
        let store = store.clone();
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            let Some((category_id, raw)) = (*editing).clone() else {
                return;
            };
            let Some(amount) = parse_amount(&raw) else {
                editing.set(None);
                return;
            };
            let store = store.clone();
            let editing = editing.clone();
            spawn_local(async move {
                if ops::set_allocated(&TauriBackend, &store, category_id, amount).await.is_ok() {
                    editing.set(None);
                }
            });
        })
    };

    let on_allocation_key = {
        let save_allocation = save_allocation.clone();
        let editing = editing.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => save_allocation.emit(()),
            "Escape" => editing.set(None),
            _ => {}
        })
    };

    let open_ledger = {
        let ledger_for = ledger_for.clone();
        Callback::from(move |category_id: i64| ledger_for.set(Some(category_id)))
    };

    let close_ledger = {
        let ledger_for = ledger_for.clone();
        Callback::from(move |_| ledger_for.set(None))
    };

    let toggle_columns = {
        let show_columns = show_columns.clone();
        Callback::from(move |_| show_columns.set(!*show_columns))
    };

    let header_class = |id: ColumnId| match id.align() {
        Align::Left => "px-4 py-3 text-left text-xs font-medium text-slate-500 uppercase tracking-wider",
        Align::Right => "px-4 py-3 text-right text-xs font-medium text-slate-500 uppercase tracking-wider",
    };

    let render_cell = |category: &CategoryStats, id: ColumnId| -> Html {
        let cell_class = match id.align() {
            Align::Left => "px-4 py-3 text-left text-sm text-slate-700",
            Align::Right => "px-4 py-3 text-right text-sm text-slate-700 tabular-nums",
        };
        let category_id = category.category_id;
        let content = match id {
            ColumnId::Allocated => match &*editing {
                Some((editing_id, raw)) if *editing_id == category_id => html! {
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        class="w-28 px-2 py-1 border border-blue-300 rounded text-right"
                        value={raw.clone()}
                        oninput={{
                            let editing = editing.clone();
                            Callback::from(move |e: InputEvent| editing.set(Some((category_id, input_value(&e)))))
                        }}
                        onkeydown={on_allocation_key.clone()}
                        onblur={{
                            let save_allocation = save_allocation.clone();
                            Callback::from(move |_| save_allocation.emit(()))
                        }}
                    />
                },
                _ => {
                    let editing = editing.clone();
                    let current = category.allocated.to_string();
                    html! {
                        <button
                            title="Click to edit"
                            class="hover:text-blue-700 hover:underline"
                            onclick={Callback::from(move |_| editing.set(Some((category_id, current.clone()))))}
                        >
                            { format_currency(category.allocated) }
                        </button>
                    }
                }
            },
            ColumnId::Net => {
                let open_ledger = open_ledger.clone();
                let tone = if category.net < 0.0 {
                    "text-red-600 hover:underline"
                } else {
                    "text-green-600 hover:underline"
                };
                html! {
                    <button class={tone} title="Open ledger" onclick={Callback::from(move |_| open_ledger.emit(category_id))}>
                        { format_signed_currency(category.net) }
                    </button>
                }
            }
            ColumnId::Remaining => html! {
                <span class={if category.remaining < 0.0 { "text-red-600 font-medium" } else { "text-slate-900 font-medium" }}>
                    { format_currency(category.remaining) }
                </span>
            },
            ColumnId::LastActivity => html! { { last_activity(&tz, category) } },
            ColumnId::Entries => html! { { category.entries_count.to_string() } },
        };
        html! { <td class={cell_class}>{ content }</td> }
    };

    html! {
        <div class="bg-white rounded-lg border border-slate-200">
            <div class="flex items-center justify-between px-4 py-3 border-b border-slate-200">
                <h3 class="text-lg font-semibold text-slate-900">{"Categories"}</h3>
                <div class="relative flex items-center gap-2">
                    <button onclick={on_refresh} disabled={store.loading} class="px-3 py-2 text-sm rounded-lg bg-slate-100 text-slate-700 hover:bg-slate-200 disabled:opacity-50">
                        { if store.loading { "Loading..." } else { "Refresh" } }
                    </button>
                    <button onclick={toggle_columns.clone()} class="flex items-center gap-1 px-3 py-2 text-sm rounded-lg bg-slate-100 text-slate-700 hover:bg-slate-200">
                        { icon_layout_grid() }{"Columns"}
                    </button>
                    if *show_columns {
                        <ColumnPopover store={store.clone()} on_close={toggle_columns} />
                    }
                </div>
            </div>

            if store.categories.is_empty() {
                <p class="p-6 text-center text-slate-500">
                    { if store.loading { "Loading categories..." } else { "No categories yet. Add one below or apply a template." } }
                </p>
            } else {
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-slate-200">
                        <thead class="bg-slate-50">
                            <tr>
                                <th class="px-4 py-3 text-left text-xs font-medium text-slate-500 uppercase tracking-wider">{"Category"}</th>
                                { for visible.iter().map(|id| html! { <th class={header_class(*id)}>{ id.label() }</th> }) }
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-slate-100">
                            { for store.categories.iter().map(|category| {
                                let category_id = category.category_id;
                                let open_ledger = open_ledger.clone();
                                html! {
                                    <tr key={category_id} class="hover:bg-slate-50">
                                        <td class="px-4 py-3 text-sm font-medium text-slate-900">
                                            <button class="hover:text-blue-700" onclick={Callback::from(move |_| open_ledger.emit(category_id))}>
                                                { category.name.clone() }
                                            </button>
                                        </td>
                                        { for visible.iter().map(|id| render_cell(category, *id)) }
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            }

            if let Some(category_id) = *ledger_for {
                <LedgerModal store={store.clone()} category_id={category_id} on_close={close_ledger} />
            }
        </div>
    }
}

fn last_activity(tz: &TimezoneContext, category: &CategoryStats) -> String {
    format_last_activity(tz, category.last_activity_at.as_deref())
}

#[derive(Properties, PartialEq)]
struct ColumnPopoverProps {
    store: StoreHandle,
    on_close: Callback<MouseEvent>,
}

#[function_component(ColumnPopover)]
fn column_popover(props: &ColumnPopoverProps) -> Html {
    let selection = props.store.visible_columns.clone();

    let apply = {
        let store = props.store.clone();
        Callback::from(move |next: ColumnSelection| {
            if let Err(err) = ops::set_visible_columns(&store, &BrowserStorage, next) {
                tracing::warn!(error = %err, "column selection not saved");
            }
        })
    };

    html! {
        <div class="absolute right-0 top-12 z-20 w-64 bg-white border border-slate-200 rounded-lg shadow-lg p-4 space-y-4">
            <div class="flex items-center justify-between">
                <span class="text-sm font-semibold text-slate-900">{"Visible Columns"}</span>
                <button onclick={props.on_close.clone()} class="text-slate-400 hover:text-slate-700">{ icon_x() }</button>
            </div>
            <div class="flex flex-wrap gap-2">
                { for PRESETS.iter().map(|(name, _)| {
                    let apply = apply.clone();
                    let name = *name;
                    html! {
                        <button
                            class="px-2 py-1 text-xs rounded bg-slate-100 text-slate-700 hover:bg-blue-100 hover:text-blue-700"
                            onclick={Callback::from(move |_| {
                                if let Some(preset) = ColumnSelection::preset(name) {
                                    apply.emit(preset);
                                }
                            })}
                        >
                            { name }
                        </button>
                    }
                }) }
            </div>
            <div class="space-y-2">
                { for ColumnId::ALL.iter().map(|id| {
                    let id = *id;
                    let checked = selection.contains(id);
                    let locked = checked && selection.len() == 1;
                    let apply = apply.clone();
                    let selection = selection.clone();
                    html! {
                        <label class="flex items-center gap-2 text-sm text-slate-700">
                            <input
                                type="checkbox"
                                checked={checked}
                                disabled={locked}
                                onchange={Callback::from(move |_| apply.emit(selection.toggled(id)))}
                            />
                            { id.label() }
                        </label>
                    }
                }) }
            </div>
            <p class="text-xs text-slate-500 border-t border-slate-100 pt-2">
                { format!("{} of {} columns visible", selection.len(), ColumnId::ALL.len()) }
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NewCategoryFormProps {
    pub store: StoreHandle,
    pub budget_id: i64,
}

#[function_component(NewCategoryForm)]
pub fn new_category_form(props: &NewCategoryFormProps) -> Html {
    let name = use_state(String::new);
    let amount = use_state(String::new);
    let errors = use_state(FieldErrors::new);

    let on_submit = {
        let store = props.store.clone();
        let budget_id = props.budget_id;
        let name = name.clone();
        let amount = amount.clone();
        let errors = errors.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let category = NewCategory {
                budget_id,
                category_name: (*name).clone(),
                allocated_amount: parse_amount(&amount).unwrap_or(-1.0),
            };
            let store = store.clone();
            let name = name.clone();
            let amount = amount.clone();
            let errors = errors.clone();
            spawn_local(async move {
                match ops::add_category(&TauriBackend, &store, category).await {
                    Ok(_) => {
                        name.set(String::new());
                        amount.set(String::new());
                        errors.set(FieldErrors::new());
                    }
                    Err(err) => {
                        if let Some(field_errors) = err.field_errors() {
                            errors.set(field_errors.clone());
                        }
                    }
                }
            });
        })
    };

    let field_error = |field: &str| match errors.get(field) {
        Some(message) => html! { <p class="mt-1 text-xs text-red-600">{ message.to_string() }</p> },
        None => html! {},
    };

    html! {
        <form class="bg-white rounded-lg border border-slate-200 p-4 flex flex-col sm:flex-row gap-3 sm:items-start" onsubmit={on_submit}>
            <div class="flex-1">
                <input
                    type="text"
                    class="w-full px-3 py-2 border border-slate-300 rounded-lg"
                    placeholder="Category name"
                    value={(*name).clone()}
                    oninput={{
                        let name = name.clone();
                        Callback::from(move |e: InputEvent| name.set(input_value(&e)))
                    }}
                />
                { field_error("category_name") }
            </div>
            <div>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    class="w-40 px-3 py-2 border border-slate-300 rounded-lg"
                    placeholder="Allocated"
                    value={(*amount).clone()}
                    oninput={{
                        let amount = amount.clone();
                        Callback::from(move |e: InputEvent| amount.set(input_value(&e)))
                    }}
                />
                { field_error("allocated") }
            </div>
            <button type="submit" class="flex items-center gap-1 bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium">
                { icon_plus() }{"Add Category"}
            </button>
        </form>
    }
}
