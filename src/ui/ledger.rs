use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::*;
use super::{confirm, input_value, select_value, use_timezone, StoreHandle};
use crate::backend::TauriBackend;
use crate::error::FieldErrors;
use crate::format::{format_currency, format_signed_currency};
use crate::model::EntryType;
use crate::sorting::LedgerSort;
use crate::store::ops;
use crate::timezone::TimezoneContext;
use crate::validation::EntryForm;

fn blank_form(tz: &TimezoneContext) -> EntryForm {
    EntryForm {
        entry_type: Some(EntryType::Expense),
        date: tz.today(Utc::now()).format("%Y-%m-%d").to_string(),
        ..EntryForm::default()
    }
}

#[derive(Properties, PartialEq)]
pub struct LedgerModalProps {
    pub store: StoreHandle,
    pub category_id: i64,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(LedgerModal)]
pub fn ledger_modal(props: &LedgerModalProps) -> Html {
    let tz = use_timezone();
    let sort = use_state(LedgerSort::default);
    let form = use_state(|| blank_form(&tz));
    let errors = use_state(FieldErrors::new);
    let editing = use_state(|| None::<(i64, EntryForm)>);
    let edit_errors = use_state(FieldErrors::new);
    let store = props.store.clone();
    let category_id = props.category_id;

    {
        let store = store.clone();
        use_effect_with_deps(
            move |(category_id, sort): &(i64, LedgerSort)| {
                let category_id = *category_id;
                let sort = *sort;
                spawn_local(async move {
                    let _ = ops::fetch_ledger(&TauriBackend, &store, category_id, sort).await;
                });
                || ()
            },
            (category_id, *sort),
        );
    }

    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |e: Event| sort.set(LedgerSort::from_str_or_default(&select_value(&e))))
    };

    let on_form_change = {
        let form = form.clone();
        Callback::from(move |next: EntryForm| form.set(next))
    };

    let on_add = {
        let store = store.clone();
        let form = form.clone();
        let errors = errors.clone();
        let tz = tz.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let entry = match form.to_new_entry(category_id) {
                Ok(entry) => entry,
                Err(field_errors) => {
                    errors.set(field_errors);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            // The row is already visible; keep the date and type for the next entry.
            form.set(EntryForm {
                entry_type: form.entry_type,
                date: if form.date.is_empty() {
                    blank_form(&tz).date
                } else {
                    form.date.clone()
                },
                ..EntryForm::default()
            });
            let store = store.clone();
            spawn_local(async move {
                let _ = ops::add_entry(&TauriBackend, &store, entry).await;
            });
        })
    };

    let on_edit_change = {
        let editing = editing.clone();
        Callback::from(move |next: EntryForm| {
            if let Some((entry_id, _)) = &*editing {
                editing.set(Some((*entry_id, next)));
            }
        })
    };

    let on_save_edit = {
        let store = store.clone();
        let editing = editing.clone();
        let edit_errors = edit_errors.clone();
        Callback::from(move |_| {
            let Some((entry_id, draft)) = (*editing).clone() else {
                return;
            };
            let update = match draft.to_update(entry_id) {
                Ok(update) => update,
                Err(field_errors) => {
                    edit_errors.set(field_errors);
                    return;
                }
            };
            let store = store.clone();
            let editing = editing.clone();
            let edit_errors = edit_errors.clone();
            spawn_local(async move {
                match ops::update_entry(&TauriBackend, &store, update).await {
                    Ok(()) => {
                        edit_errors.set(FieldErrors::new());
                        editing.set(None);
                    }
                    Err(err) => {
                        if let Some(field_errors) = err.field_errors() {
                            edit_errors.set(field_errors.clone());
                        }
                    }
                }
            });
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let category = store.category(category_id);
    let title = category.map(|c| c.name.clone()).unwrap_or_else(|| "Ledger".to_string());
    let entries = store.ledger(category_id);

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-4xl max-h-[90vh] overflow-y-auto p-6 space-y-6">
                <div class="flex items-start justify-between">
                    <div>
                        <h2 class="text-2xl font-bold text-slate-900">{ title }</h2>
                        if let Some(category) = category {
                            <p class="text-sm text-slate-600">
                                { format!(
                                    "Allocated {} · Net {} · Remaining {}",
                                    format_currency(category.allocated),
                                    format_signed_currency(category.net),
                                    format_currency(category.remaining)
                                ) }
                            </p>
                        }
                    </div>
                    <button onclick={props.on_close.clone()} class="p-2 rounded-md text-slate-600 hover:text-slate-900 hover:bg-slate-100">{ icon_x() }</button>
                </div>

                if let Some(message) = &store.error {
                    <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded text-sm">{ message.clone() }</div>
                }

                <form class="bg-slate-50 rounded-lg border border-slate-200 p-4 space-y-3" onsubmit={on_add}>
                    <EntryFields form={(*form).clone()} errors={(*errors).clone()} on_change={on_form_change} />
                    <div class="flex justify-end">
                        <button type="submit" class="flex items-center gap-1 bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium">
                            { icon_plus() }{"Add Entry"}
                        </button>
                    </div>
                </form>

                <div class="flex items-center justify-between">
                    <h3 class="text-lg font-semibold text-slate-900">{"Entries"}</h3>
                    <select class="px-3 py-2 border border-slate-300 rounded-lg text-sm" onchange={on_sort}>
                        { for LedgerSort::ALL.iter().map(|option| html! {
                            <option value={option.as_str()} selected={*option == *sort}>{ option.label() }</option>
                        }) }
                    </select>
                </div>

                if entries.is_empty() {
                    <p class="text-center text-slate-500 py-6">{"No entries yet."}</p>
                } else {
                    <table class="min-w-full divide-y divide-slate-200 text-sm">
                        <thead class="bg-slate-50">
                            <tr>
                                <th class="px-3 py-2 text-left font-medium text-slate-500">{"Date"}</th>
                                <th class="px-3 py-2 text-left font-medium text-slate-500">{"Description"}</th>
                                <th class="px-3 py-2 text-left font-medium text-slate-500">{"Where"}</th>
                                <th class="px-3 py-2 text-right font-medium text-slate-500">{"Amount"}</th>
                                <th class="px-3 py-2"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-slate-100">
                            { for entries.iter().map(|entry| {
                                let entry_id = entry.entry_id;
                                if let Some((_, draft)) = (*editing).as_ref().filter(|(id, _)| *id == entry_id) {
                                    return html! {
                                        <tr key={entry_id}>
                                            <td colspan="5" class="p-3 bg-blue-50">
                                                <EntryFields form={draft.clone()} errors={(*edit_errors).clone()} on_change={on_edit_change.clone()} />
                                                <div class="flex justify-end gap-2 mt-3">
                                                    <button onclick={on_cancel_edit.clone()} class="px-3 py-1 rounded border border-slate-300 text-slate-700">{"Cancel"}</button>
                                                    <button onclick={on_save_edit.clone()} class="px-3 py-1 rounded bg-blue-700 text-white">{"Save"}</button>
                                                </div>
                                            </td>
                                        </tr>
                                    };
                                }

                                let provisional = entry.is_provisional();
                                let on_edit = {
                                    let editing = editing.clone();
                                    let edit_errors = edit_errors.clone();
                                    let draft = EntryForm::from_entry(entry);
                                    Callback::from(move |_| {
                                        edit_errors.set(FieldErrors::new());
                                        editing.set(Some((entry_id, draft.clone())));
                                    })
                                };
                                let on_delete = {
                                    let store = store.clone();
                                    Callback::from(move |_| {
                                        if !confirm("Delete this entry?") {
                                            return;
                                        }
                                        let store = store.clone();
                                        spawn_local(async move {
                                            let _ = ops::delete_entry(&TauriBackend, &store, entry_id).await;
                                        });
                                    })
                                };
                                let amount_class = match entry.entry_type {
                                    EntryType::Income => "px-3 py-2 text-right tabular-nums text-green-600",
                                    EntryType::Expense => "px-3 py-2 text-right tabular-nums text-red-600",
                                    EntryType::Adjustment => "px-3 py-2 text-right tabular-nums text-slate-600",
                                };
                                html! {
                                    <tr key={entry_id} class={if provisional { "opacity-60" } else { "" }}>
                                        <td class="px-3 py-2 whitespace-nowrap">{ tz.format(&entry.date).date }</td>
                                        <td class="px-3 py-2">
                                            { entry.what.clone() }
                                            if provisional {
                                                <span class="ml-2 text-xs text-slate-500 italic">{"Saving..."}</span>
                                            }
                                        </td>
                                        <td class="px-3 py-2 text-slate-600">{ entry.place.clone().unwrap_or_default() }</td>
                                        <td class={amount_class}>{ format!("{}{}", entry.entry_type.glyph(), format_currency(entry.amount)) }</td>
                                        <td class="px-3 py-2 text-right whitespace-nowrap">
                                            if !provisional {
                                                <button onclick={on_edit} title="Edit" class="p-1 text-slate-400 hover:text-blue-600">{ icon_edit() }</button>
                                                <button onclick={on_delete} title="Delete" class="p-1 text-slate-400 hover:text-red-600">{ icon_trash() }</button>
                                            }
                                        </td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct EntryFieldsProps {
    form: EntryForm,
    errors: FieldErrors,
    on_change: Callback<EntryForm>,
}

#[function_component(EntryFields)]
fn entry_fields(props: &EntryFieldsProps) -> Html {
    let update = |apply: fn(&mut EntryForm, String)| {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = form.clone();
            apply(&mut next, input_value(&e));
            on_change.emit(next);
        })
    };

    let on_type = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut next = form.clone();
            next.entry_type = select_value(&e).parse().ok();
            on_change.emit(next);
        })
    };

    let field_error = |field: &str| match props.errors.get(field) {
        Some(message) => html! { <p class="mt-1 text-xs text-red-600">{ message.to_string() }</p> },
        None => html! {},
    };
    let input_class = "w-full px-3 py-2 border border-slate-300 rounded-lg";

    html! {
        <div class="grid grid-cols-1 md:grid-cols-5 gap-3">
            <div>
                <select class={input_class} onchange={on_type}>
                    { for EntryType::ALL.iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={props.form.entry_type == Some(*kind)}>{ kind.label() }</option>
                    }) }
                </select>
            </div>
            <div class="md:col-span-2">
                <input
                    type="text"
                    class={input_class}
                    placeholder="What"
                    value={props.form.what.clone()}
                    oninput={update(|form, value| form.what = value)}
                />
                { field_error("what") }
            </div>
            <div>
                <input
                    type="text"
                    class={input_class}
                    placeholder="Where (optional)"
                    value={props.form.place.clone()}
                    oninput={update(|form, value| form.place = value)}
                />
            </div>
            <div>
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    class={input_class}
                    placeholder="Amount"
                    value={props.form.amount.clone()}
                    oninput={update(|form, value| form.amount = value)}
                />
                { field_error("amount") }
            </div>
            <div>
                <input
                    type="date"
                    class={input_class}
                    value={props.form.date.clone()}
                    oninput={update(|form, value| form.date = value)}
                />
                { field_error("date") }
            </div>
        </div>
    }
}
