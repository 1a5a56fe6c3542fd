use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::*;
use super::{confirm, error_banner, input_value, select_value, use_timezone};
use crate::backend::TauriBackend;
use crate::catalog::{self, global_category_name, Catalog, Loaded};
use crate::error::FieldErrors;
use crate::format::{format_currency, parse_amount};
use crate::model::{BudgetTemplateWithCategories, CategoryKind, GlobalCategory, GlobalCategoryDraft, TemplateDraft};

fn field_error(errors: &FieldErrors, field: &str) -> Html {
    match errors.get(field) {
        Some(message) => html! { <p class="mt-1 text-sm text-red-600">{ message.to_string() }</p> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct MigrationRunnerProps {
    on_done: Callback<()>,
}

#[function_component(MigrationRunner)]
fn migration_runner(props: &MigrationRunnerProps) -> Html {
    let running = use_state(|| false);
    let result = use_state(|| None::<Result<String, String>>);

    let on_run = {
        let running = running.clone();
        let result = result.clone();
        let on_done = props.on_done.clone();
        Callback::from(move |_| {
            let running = running.clone();
            let result = result.clone();
            let on_done = on_done.clone();
            running.set(true);
            spawn_local(async move {
                match catalog::run_migration(&TauriBackend).await {
                    Ok(message) => {
                        result.set(Some(Ok(message)));
                        on_done.emit(());
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "migration failed");
                        result.set(Some(Err(err.to_string())));
                    }
                }
                running.set(false);
            });
        })
    };

    html! {
        <div class="bg-white rounded-lg border border-slate-200 p-8 text-center max-w-xl mx-auto space-y-4">
            <div class="w-16 h-16 bg-blue-100 rounded-full flex items-center justify-center mx-auto text-blue-600">{ icon_database() }</div>
            <h3 class="text-lg font-semibold text-slate-900">{"Database Setup Required"}</h3>
            <p class="text-slate-600">{"Templates and global categories need a one-time database update before they can be used."}</p>
            <button
                onclick={on_run}
                disabled={*running}
                class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 disabled:opacity-50"
            >
                { if *running { "Setting up..." } else { "Setup Database" } }
            </button>
            {
                match &*result {
                    Some(Ok(message)) => html! { <p class="text-sm text-green-700">{ message.clone() }</p> },
                    Some(Err(message)) => html! { <p class="text-sm text-red-600">{ message.clone() }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

/// Editor state: `None` id means a new template.
#[derive(Clone, PartialEq)]
struct Editing {
    template_id: Option<i64>,
    draft: TemplateDraft,
}

#[function_component(TemplatesPage)]
pub fn templates_page() -> Html {
    let tz = use_timezone();
    let catalog_state = use_state(|| None::<Loaded<Catalog>>);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);
    let editing = use_state(|| None::<Editing>);
    let viewing = use_state(|| None::<BudgetTemplateWithCategories>);

    {
        let catalog_state = catalog_state.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_catalog(&TauriBackend).await {
                        Ok(loaded) => catalog_state.set(Some(loaded)),
                        Err(err) => {
                            tracing::error!(error = %err, "failed to load templates");
                            error.set(Some(err.to_string()));
                        }
                    }
                });
                || ()
            },
            *reload,
        );
    }

    let bump = {
        let reload = reload.clone();
        Callback::from(move |_: ()| reload.set(*reload + 1))
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let globals: Vec<GlobalCategory> = match &*catalog_state {
        Some(Loaded::Ready(loaded)) => loaded.global_categories.clone(),
        _ => Vec::new(),
    };

    let content = match &*catalog_state {
        None => html! { <p class="text-slate-500">{"Loading templates..."}</p> },
        Some(Loaded::NeedsMigration) => html! { <MigrationRunner on_done={bump.clone()} /> },
        Some(Loaded::Ready(loaded)) => {
            let on_new = {
                let editing = editing.clone();
                Callback::from(move |_| {
                    editing.set(Some(Editing {
                        template_id: None,
                        draft: TemplateDraft::default(),
                    }))
                })
            };
            html! {
                <>
                    <div class="flex justify-between items-center">
                        <h2 class="text-3xl font-bold text-slate-900">{"Budget Templates"}</h2>
                        <button onclick={on_new} class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium shadow-sm flex items-center gap-2">
                            { icon_plus() }{"New Template"}
                        </button>
                    </div>
                    if loaded.templates.is_empty() {
                        <div class="bg-white rounded-lg border border-slate-200 p-8 text-center text-slate-600">
                            {"No templates yet. Create one to reuse category allocations across budgets."}
                        </div>
                    } else {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            { for loaded.templates.iter().map(|template| {
                                let template_id = template.template_id;
                                let on_view = {
                                    let viewing = viewing.clone();
                                    let error = error.clone();
                                    Callback::from(move |_| {
                                        let viewing = viewing.clone();
                                        let error = error.clone();
                                        spawn_local(async move {
                                            match catalog::load_template(&TauriBackend, template_id).await {
                                                Ok(full) => viewing.set(Some(full)),
                                                Err(err) => error.set(Some(err.to_string())),
                                            }
                                        });
                                    })
                                };
                                let on_edit = {
                                    let editing = editing.clone();
                                    let error = error.clone();
                                    Callback::from(move |_| {
                                        let editing = editing.clone();
                                        let error = error.clone();
                                        spawn_local(async move {
                                            match catalog::load_template(&TauriBackend, template_id).await {
                                                Ok(full) => editing.set(Some(Editing {
                                                    template_id: Some(template_id),
                                                    draft: TemplateDraft::from_template(&full),
                                                })),
                                                Err(err) => error.set(Some(err.to_string())),
                                            }
                                        });
                                    })
                                };
                                let on_delete = {
                                    let error = error.clone();
                                    let bump = bump.clone();
                                    Callback::from(move |_| {
                                        if !confirm("Delete this template?") {
                                            return;
                                        }
                                        let error = error.clone();
                                        let bump = bump.clone();
                                        spawn_local(async move {
                                            match catalog::delete_template(&TauriBackend, template_id).await {
                                                Ok(()) => bump.emit(()),
                                                Err(err) => error.set(Some(err.to_string())),
                                            }
                                        });
                                    })
                                };
                                html! {
                                    <div key={template_id} class="bg-white rounded-lg border border-slate-200 p-6 space-y-3">
                                        <div class="flex items-start justify-between">
                                            <div>
                                                <h3 class="text-lg font-semibold text-slate-900">{ template.name.clone() }</h3>
                                                if let Some(description) = &template.description {
                                                    <p class="text-sm text-slate-600">{ description.clone() }</p>
                                                }
                                            </div>
                                            <div class="flex gap-1">
                                                <button onclick={on_edit} title="Edit" class="p-2 text-slate-400 hover:text-blue-600">{ icon_edit() }</button>
                                                <button onclick={on_delete} title="Delete" class="p-2 text-slate-400 hover:text-red-600">{ icon_trash() }</button>
                                            </div>
                                        </div>
                                        <div class="flex justify-between text-sm text-slate-600">
                                            <span>{ format!("{} categories", template.category_count) }</span>
                                            <span class="font-semibold text-slate-900">{ format_currency(template.total_amount) }</span>
                                        </div>
                                        <div class="flex justify-between items-center text-xs text-slate-500">
                                            <span>{ format!("Created {}", tz.format(&template.created_at).date) }</span>
                                            <button onclick={on_view} class="text-blue-700 hover:underline">{"View"}</button>
                                        </div>
                                    </div>
                                }
                            }) }
                        </div>
                    }
                </>
            }
        }
    };

    html! {
        <div class="space-y-6">
            if let Some(message) = &*error {
                { error_banner(message, on_dismiss) }
            }
            { content }
            if let Some(template) = &*viewing {
                <TemplateView
                    template={template.clone()}
                    on_close={{
                        let viewing = viewing.clone();
                        Callback::from(move |_| viewing.set(None))
                    }}
                />
            }
            if let Some(state) = &*editing {
                <TemplateEditor
                    editing={state.clone()}
                    globals={globals}
                    on_close={{
                        let editing = editing.clone();
                        Callback::from(move |_| editing.set(None))
                    }}
                    on_saved={{
                        let editing = editing.clone();
                        let bump = bump.clone();
                        Callback::from(move |_| {
                            editing.set(None);
                            bump.emit(());
                        })
                    }}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TemplateViewProps {
    template: BudgetTemplateWithCategories,
    on_close: Callback<MouseEvent>,
}

#[function_component(TemplateView)]
fn template_view(props: &TemplateViewProps) -> Html {
    let mut categories = props.template.categories.clone();
    categories.sort_by_key(|c| c.sort_order);
    let total: f64 = categories.iter().map(|c| c.allocated_amount).sum();

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold text-slate-900">{ props.template.name.clone() }</h2>
                    <button onclick={props.on_close.clone()} class="p-2 rounded-md text-slate-600 hover:bg-slate-100">{ icon_x() }</button>
                </div>
                <ul class="divide-y divide-slate-100">
                    { for categories.iter().map(|c| html! {
                        <li class="flex justify-between py-2 text-sm">
                            <span>
                                { c.category_name.clone() }
                                <span class="ml-2 text-xs text-slate-500">{ c.category_type.as_str() }</span>
                            </span>
                            <span class="tabular-nums">{ format_currency(c.allocated_amount) }</span>
                        </li>
                    }) }
                </ul>
                <div class="flex justify-between font-semibold border-t border-slate-200 pt-2">
                    <span>{"Total"}</span>
                    <span>{ format_currency(total) }</span>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TemplateEditorProps {
    editing: Editing,
    globals: Vec<GlobalCategory>,
    on_close: Callback<MouseEvent>,
    on_saved: Callback<()>,
}

#[function_component(TemplateEditor)]
fn template_editor(props: &TemplateEditorProps) -> Html {
    let draft = use_state(|| props.editing.draft.clone());
    let errors = use_state(FieldErrors::new);
    let notice = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_add_category = {
        let draft = draft.clone();
        let notice = notice.clone();
        let globals = props.globals.clone();
        Callback::from(move |_| {
            let mut next = (*draft).clone();
            match next.add_next_category(&globals) {
                Ok(()) => {
                    notice.set(None);
                    draft.set(next);
                }
                Err(err) => notice.set(Some(err.message)),
            }
        })
    };

    let on_save = {
        let draft = draft.clone();
        let errors = errors.clone();
        let notice = notice.clone();
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        let template_id = props.editing.template_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let current = (*draft).clone();
            let errors = errors.clone();
            let notice = notice.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            saving.set(true);
            spawn_local(async move {
                match catalog::save_template(&TauriBackend, template_id, &current).await {
                    Ok(_) => on_saved.emit(()),
                    Err(err) => match err.field_errors() {
                        Some(field_errors) => errors.set(field_errors.clone()),
                        None => notice.set(Some(err.to_string())),
                    },
                }
                saving.set(false);
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-slate-300 rounded-lg";

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <form class="bg-white rounded-lg shadow-xl w-full max-w-2xl max-h-[90vh] overflow-y-auto p-6 space-y-4" onsubmit={on_save}>
                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold text-slate-900">
                        { if props.editing.template_id.is_some() { "Edit Template" } else { "New Template" } }
                    </h2>
                    <button type="button" onclick={props.on_close.clone()} class="p-2 rounded-md text-slate-600 hover:bg-slate-100">{ icon_x() }</button>
                </div>

                <div>
                    <label class="block text-sm font-medium text-slate-700 mb-1">{"Name"}</label>
                    <input
                        type="text"
                        class={input_class}
                        value={draft.name.clone()}
                        oninput={{
                            let draft = draft.clone();
                            Callback::from(move |e: InputEvent| {
                                let mut next = (*draft).clone();
                                next.name = input_value(&e);
                                draft.set(next);
                            })
                        }}
                    />
                    { field_error(&errors, "name") }
                </div>
                <div>
                    <label class="block text-sm font-medium text-slate-700 mb-1">{"Description"}</label>
                    <input
                        type="text"
                        class={input_class}
                        value={draft.description.clone().unwrap_or_default()}
                        oninput={{
                            let draft = draft.clone();
                            Callback::from(move |e: InputEvent| {
                                let mut next = (*draft).clone();
                                next.description = Some(input_value(&e));
                                draft.set(next);
                            })
                        }}
                    />
                </div>

                <div class="space-y-2">
                    <div class="flex items-center justify-between">
                        <span class="text-sm font-medium text-slate-700">{"Categories"}</span>
                        <button type="button" onclick={on_add_category} class="flex items-center gap-1 text-sm text-blue-700 hover:underline">
                            { icon_plus() }{"Add Category"}
                        </button>
                    </div>
                    { for draft.categories.iter().enumerate().map(|(index, row)| {
                        let on_global = {
                            let draft = draft.clone();
                            Callback::from(move |e: Event| {
                                if let Ok(id) = select_value(&e).parse::<i64>() {
                                    let mut next = (*draft).clone();
                                    next.set_global_category(index, id);
                                    draft.set(next);
                                }
                            })
                        };
                        let on_amount = {
                            let draft = draft.clone();
                            Callback::from(move |e: InputEvent| {
                                let mut next = (*draft).clone();
                                next.set_amount(index, parse_amount(&input_value(&e)).unwrap_or(0.0));
                                draft.set(next);
                            })
                        };
                        let on_kind = {
                            let draft = draft.clone();
                            Callback::from(move |e: Event| {
                                let kind = match select_value(&e).as_str() {
                                    "savings" => CategoryKind::Savings,
                                    _ => CategoryKind::Expense,
                                };
                                let mut next = (*draft).clone();
                                next.set_kind(index, kind);
                                draft.set(next);
                            })
                        };
                        let on_remove = {
                            let draft = draft.clone();
                            Callback::from(move |_| {
                                let mut next = (*draft).clone();
                                next.remove_category(index);
                                draft.set(next);
                            })
                        };
                        html! {
                            <div class="flex gap-2 items-center">
                                <select class="flex-1 px-2 py-2 border border-slate-300 rounded-lg" onchange={on_global}>
                                    if !props.globals.iter().any(|g| g.global_category_id == row.global_category_id) {
                                        <option selected=true>{ global_category_name(&props.globals, row.global_category_id) }</option>
                                    }
                                    { for props.globals.iter().map(|g| html! {
                                        <option value={g.global_category_id.to_string()} selected={g.global_category_id == row.global_category_id}>
                                            { g.name.clone() }
                                        </option>
                                    }) }
                                </select>
                                <input
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    class="w-32 px-2 py-2 border border-slate-300 rounded-lg text-right"
                                    value={row.allocated_amount.to_string()}
                                    oninput={on_amount}
                                />
                                <select class="px-2 py-2 border border-slate-300 rounded-lg" onchange={on_kind}>
                                    { for [CategoryKind::Expense, CategoryKind::Savings].iter().map(|kind| html! {
                                        <option value={kind.as_str()} selected={*kind == row.category_type}>{ kind.as_str() }</option>
                                    }) }
                                </select>
                                <button type="button" onclick={on_remove} class="p-2 text-slate-400 hover:text-red-600">{ icon_trash() }</button>
                            </div>
                        }
                    }) }
                    { field_error(&errors, "categories") }
                    if let Some(message) = &*notice {
                        <p class="text-sm text-amber-700">{ message.clone() }</p>
                    }
                </div>

                <div class="flex justify-between items-center border-t border-slate-200 pt-3">
                    <span class="font-semibold text-slate-900">{ format!("Total: {}", format_currency(draft.total())) }</span>
                    <button type="submit" disabled={*saving} class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium disabled:opacity-50">
                        { if *saving { "Saving..." } else { "Save Template" } }
                    </button>
                </div>
            </form>
        </div>
    }
}

#[function_component(GlobalCategoriesPage)]
pub fn global_categories_page() -> Html {
    let categories = use_state(|| None::<Loaded<Vec<GlobalCategory>>>);
    let reload = use_state(|| 0u32);
    let error = use_state(|| None::<String>);
    let form = use_state(GlobalCategoryDraft::default);
    let form_errors = use_state(FieldErrors::new);
    let editing = use_state(|| None::<(i64, GlobalCategoryDraft)>);

    {
        let categories = categories.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_global_categories(&TauriBackend).await {
                        Ok(loaded) => categories.set(Some(loaded)),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                });
                || ()
            },
            *reload,
        );
    }

    let bump = {
        let reload = reload.clone();
        Callback::from(move |_: ()| reload.set(*reload + 1))
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let on_create = {
        let form = form.clone();
        let form_errors = form_errors.clone();
        let error = error.clone();
        let bump = bump.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = (*form).clone();
            let form = form.clone();
            let form_errors = form_errors.clone();
            let error = error.clone();
            let bump = bump.clone();
            spawn_local(async move {
                match catalog::create_global_category(&TauriBackend, &draft).await {
                    Ok(_) => {
                        form.set(GlobalCategoryDraft::default());
                        form_errors.set(FieldErrors::new());
                        bump.emit(());
                    }
                    Err(err) => match err.field_errors() {
                        Some(field_errors) => form_errors.set(field_errors.clone()),
                        None => error.set(Some(err.to_string())),
                    },
                }
            });
        })
    };

    let on_save_edit = {
        let editing = editing.clone();
        let error = error.clone();
        let bump = bump.clone();
        Callback::from(move |_| {
            let Some((category_id, draft)) = (*editing).clone() else {
                return;
            };
            let editing = editing.clone();
            let error = error.clone();
            let bump = bump.clone();
            spawn_local(async move {
                match catalog::update_global_category(&TauriBackend, category_id, &draft).await {
                    Ok(_) => {
                        editing.set(None);
                        bump.emit(());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-slate-300 rounded-lg";

    let list = match &*categories {
        None => html! { <p class="text-slate-500">{"Loading categories..."}</p> },
        Some(Loaded::NeedsMigration) => html! { <MigrationRunner on_done={bump.clone()} /> },
        Some(Loaded::Ready(list)) if list.is_empty() => html! {
            <p class="text-slate-600">{"No global categories yet."}</p>
        },
        Some(Loaded::Ready(list)) => html! {
            <div class="bg-white rounded-lg border border-slate-200 divide-y divide-slate-100">
                { for list.iter().map(|category| {
                    let category_id = category.global_category_id;
                    if let Some((_, draft)) = (*editing).as_ref().filter(|(id, _)| *id == category_id) {
                        let draft = draft.clone();
                        return html! {
                            <div key={category_id} class="p-4 flex gap-2 items-center">
                                <input
                                    type="text"
                                    class={input_class}
                                    value={draft.name.clone()}
                                    oninput={{
                                        let editing = editing.clone();
                                        let draft = draft.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let mut next = draft.clone();
                                            next.name = input_value(&e);
                                            editing.set(Some((category_id, next)));
                                        })
                                    }}
                                />
                                <input
                                    type="text"
                                    class={input_class}
                                    placeholder="Description"
                                    value={draft.description.clone().unwrap_or_default()}
                                    oninput={{
                                        let editing = editing.clone();
                                        let draft = draft.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let mut next = draft.clone();
                                            next.description = Some(input_value(&e));
                                            editing.set(Some((category_id, next)));
                                        })
                                    }}
                                />
                                <button onclick={on_save_edit.clone()} class="p-2 text-green-600 hover:bg-green-50 rounded-lg">{ icon_check() }</button>
                                <button
                                    onclick={{
                                        let editing = editing.clone();
                                        Callback::from(move |_| editing.set(None))
                                    }}
                                    class="p-2 text-slate-500 hover:bg-slate-100 rounded-lg"
                                >
                                    { icon_x() }
                                </button>
                            </div>
                        };
                    }

                    let on_edit = {
                        let editing = editing.clone();
                        let draft = GlobalCategoryDraft {
                            name: category.name.clone(),
                            description: category.description.clone(),
                        };
                        Callback::from(move |_| editing.set(Some((category_id, draft.clone()))))
                    };
                    let on_delete = {
                        let error = error.clone();
                        let bump = bump.clone();
                        Callback::from(move |_| {
                            if !confirm("Delete this category? Templates using it will show it as Unknown.") {
                                return;
                            }
                            let error = error.clone();
                            let bump = bump.clone();
                            spawn_local(async move {
                                match catalog::delete_global_category(&TauriBackend, category_id).await {
                                    Ok(()) => bump.emit(()),
                                    Err(err) => error.set(Some(err.to_string())),
                                }
                            });
                        })
                    };
                    html! {
                        <div key={category_id} class="p-4 flex items-center justify-between">
                            <div>
                                <p class="font-medium text-slate-900">{ category.name.clone() }</p>
                                if let Some(description) = &category.description {
                                    <p class="text-sm text-slate-600">{ description.clone() }</p>
                                }
                            </div>
                            <div class="flex gap-1">
                                <button onclick={on_edit} title="Edit" class="p-2 text-slate-400 hover:text-blue-600">{ icon_edit() }</button>
                                <button onclick={on_delete} title="Delete" class="p-2 text-slate-400 hover:text-red-600">{ icon_trash() }</button>
                            </div>
                        </div>
                    }
                }) }
            </div>
        },
    };

    html! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold text-slate-900">{"Global Categories"}</h2>
            if let Some(message) = &*error {
                { error_banner(message, on_dismiss) }
            }
            if matches!(&*categories, Some(Loaded::Ready(_))) {
                <form class="bg-white rounded-lg border border-slate-200 p-4 flex flex-col sm:flex-row gap-3 sm:items-start" onsubmit={on_create}>
                    <div class="flex-1">
                        <input
                            type="text"
                            class={input_class}
                            placeholder="Category name"
                            value={form.name.clone()}
                            oninput={{
                                let form = form.clone();
                                Callback::from(move |e: InputEvent| {
                                    let mut next = (*form).clone();
                                    next.name = input_value(&e);
                                    form.set(next);
                                })
                            }}
                        />
                        { field_error(&form_errors, "name") }
                    </div>
                    <div class="flex-1">
                        <input
                            type="text"
                            class={input_class}
                            placeholder="Description (optional)"
                            value={form.description.clone().unwrap_or_default()}
                            oninput={{
                                let form = form.clone();
                                Callback::from(move |e: InputEvent| {
                                    let mut next = (*form).clone();
                                    next.description = Some(input_value(&e));
                                    form.set(next);
                                })
                            }}
                        />
                    </div>
                    <button type="submit" class="flex items-center gap-1 bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium">
                        { icon_tags() }{"Add Category"}
                    </button>
                </form>
            }
            { list }
        </div>
    }
}
