use chrono::Utc;
use yew::prelude::*;

use super::{select_value, TimezoneHandle};
use crate::prefs::BrowserStorage;
use crate::timezone::{TimezoneContext, COMMON_TIMEZONES};

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let timezone = use_context::<TimezoneHandle>();
    let notice = use_state(|| None::<String>);

    let Some(timezone) = timezone else {
        return html! {};
    };
    let current = (*timezone).clone();

    let on_change = {
        let timezone = timezone.clone();
        let notice = notice.clone();
        Callback::from(move |e: Event| {
            let name = select_value(&e);
            match TimezoneContext::new(&name) {
                Ok(next) => {
                    match next.persist(&BrowserStorage) {
                        Ok(()) => notice.set(None),
                        Err(err) => {
                            tracing::warn!(error = %err, "timezone preference not saved");
                            notice.set(Some(err.to_string()));
                        }
                    }
                    tracing::info!(timezone = next.name(), "display timezone changed");
                    timezone.set(next);
                }
                Err(err) => notice.set(Some(err.to_string())),
            }
        })
    };

    let listed = COMMON_TIMEZONES.iter().any(|(name, _)| *name == current.name());

    html! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold text-slate-900">{"Settings"}</h2>
            <div class="bg-white rounded-lg border border-slate-200 p-6 space-y-4 max-w-2xl">
                <div>
                    <h3 class="text-lg font-semibold text-slate-900">{"Timezone"}</h3>
                    <p class="text-sm text-slate-600">{"Dates and times across the app are shown in this timezone."}</p>
                </div>
                <select class="w-full px-4 py-3 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500" onchange={on_change}>
                    if !listed {
                        <option value={current.name()} selected=true>{ current.name() }</option>
                    }
                    { for COMMON_TIMEZONES.iter().map(|(name, label)| html! {
                        <option value={*name} selected={*name == current.name()}>{ *label }</option>
                    }) }
                </select>
                <div class="bg-slate-50 border border-slate-200 rounded-lg p-4 text-sm">
                    <span class="font-medium text-slate-700">{"Current time: "}</span>
                    <span class="text-slate-900">{ current.preview(Utc::now()) }</span>
                </div>
                if let Some(message) = &*notice {
                    <p class="text-sm text-red-600">{ message.clone() }</p>
                }
            </div>
        </div>
    }
}
