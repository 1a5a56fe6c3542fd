//! Yew components.
//!
//! The budget store's reducer handle is passed down as a prop; the display
//! timezone is shared through a `ContextProvider`. Catalog pages keep their
//! request state locally.

mod budgets;
mod categories;
mod detail;
mod icons;
mod ledger;
mod settings;
mod templates;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::backend::commands::InitDatabase;
use crate::backend::{Backend, TauriBackend};
use crate::columns::ColumnSelection;
use crate::prefs::BrowserStorage;
use crate::store::{ops, BudgetStore};
use crate::timezone::{host_timezone, TimezoneContext};

use self::budgets::BudgetsPage;
use self::icons::*;
use self::settings::SettingsPage;
use self::templates::{GlobalCategoriesPage, TemplatesPage};

pub type StoreHandle = UseReducerHandle<BudgetStore>;
pub type TimezoneHandle = UseStateHandle<TimezoneContext>;

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Budgets,
    Templates,
    Categories,
    Settings,
}

#[hook]
pub(crate) fn use_timezone() -> TimezoneContext {
    use_context::<TimezoneHandle>()
        .map(|handle| (*handle).clone())
        .unwrap_or_default()
}

pub(crate) fn input_value(e: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}

pub(crate) fn select_value(e: &Event) -> String {
    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub(crate) fn error_banner(message: &str, on_dismiss: Callback<MouseEvent>) -> Html {
    html! {
        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded flex items-start justify-between gap-4">
            <span>{ message.to_string() }</span>
            <button class="text-red-500 hover:text-red-700" aria-label="Dismiss" onclick={on_dismiss}>{ icon_x() }</button>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Budgets",
            page: Page::Budgets,
            icon: icon_calculator,
        },
        NavItem {
            label: "Templates",
            page: Page::Templates,
            icon: icon_file_text,
        },
        NavItem {
            label: "Categories",
            page: Page::Categories,
            icon: icon_tags,
        },
        NavItem {
            label: "Settings",
            page: Page::Settings,
            icon: icon_settings,
        },
    ];

    html! {
        <aside class="hidden lg:block w-64 bg-white border-r border-slate-200 min-h-screen">
            <nav class="p-4 space-y-2">
                { for nav_items.iter().map(|item| {
                    let class_name = if item.page == props.active_page {
                        "flex items-center gap-3 w-full px-3 py-2 text-sm font-medium rounded-lg transition-colors duration-200 bg-blue-100 text-blue-700"
                    } else {
                        "flex items-center gap-3 w-full px-3 py-2 text-sm font-medium rounded-lg transition-colors duration-200 text-slate-700 hover:bg-slate-100 hover:text-slate-900"
                    };
                    let on_select = props.on_select.clone();
                    let page = item.page;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                            <span class="shrink-0 text-slate-500">{ (item.icon)() }</span>
                            <span class="truncate">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>
        </aside>
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let open_budgets = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(Page::Budgets))
    };

    html! {
        <div class="min-h-screen bg-slate-50">
            <header class="bg-white border-b border-slate-200 shadow-sm">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex justify-between items-center h-16">
                    <h1 class="text-2xl font-bold text-slate-900 flex items-center gap-2">{ icon_layout_grid() }{"Budget Manager"}</h1>
                    <button class="bg-blue-700 hover:bg-blue-800 text-white px-4 py-2 rounded-lg font-medium transition-colors duration-200 shadow-sm" onclick={open_budgets}>
                        {"Open Budget"}
                    </button>
                </div>
            </header>
            <div class="flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
                <main class="flex-1 p-6">
                    <div class="max-w-7xl mx-auto">
                        { for props.children.iter() }
                    </div>
                </main>
            </div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let active_page = use_state(|| Page::Budgets);
    let store = use_reducer(|| BudgetStore::new(ColumnSelection::load(&BrowserStorage)));
    let timezone = use_state(|| TimezoneContext::resolve(&BrowserStorage, host_timezone()));

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    {
        let store = store.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    if let Err(err) = TauriBackend.call(&InitDatabase {}).await {
                        tracing::error!(error = %err, "database init failed");
                    }
                    let _ = ops::load_budgets(&TauriBackend, &store).await;
                });
                || ()
            },
            (),
        );
    }

    let content = match *active_page {
        Page::Budgets => html! { <BudgetsPage store={store.clone()} /> },
        Page::Templates => html! { <TemplatesPage /> },
        Page::Categories => html! { <GlobalCategoriesPage /> },
        Page::Settings => html! { <SettingsPage /> },
    };

    html! {
        <ContextProvider<TimezoneHandle> context={timezone}>
            <Layout active_page={*active_page} on_select={on_select}>
                { content }
            </Layout>
        </ContextProvider<TimezoneHandle>>
    }
}
