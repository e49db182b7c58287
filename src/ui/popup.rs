/// Popup UI for Preview Launcher

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use patternfly_yew::prelude::*;
use crate::config::{ALLOWED_DOMAINS, STORAGE_KEYS, TOKEN_LENGTH};
use crate::environment::Environment;
use crate::error::{PopupError, PopupResult};
use crate::render::generate_token;
use crate::state::{Effects, PopupEvent, PopupState};
use crate::storage::PersistedState;
use crate::ui::components::ParamGroup;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(items: JsValue) -> Result<(), JsValue>;

    fn openInNewTab(url: &str);
}

#[function_component(App)]
pub fn app() -> Html {
    let popup = use_state(PopupState::default);
    let loading = use_state(|| true);

    // Restore the last inputs on mount
    {
        let popup = popup.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_persisted().await {
                    Ok(saved) if !saved.is_empty() => {
                        log::info!("restoring saved popup state");
                        let mut next = (*popup).clone();
                        next.handle(PopupEvent::Restore(saved));
                        popup.set(next);
                    }
                    Ok(_) => {}
                    Err(e) => log::error!("{}", e),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let dispatch = {
        let popup = popup.clone();

        Callback::from(move |event: PopupEvent| {
            let mut next = (*popup).clone();
            let effects = next.handle(event);
            popup.set(next);
            run_effects(effects);
        })
    };

    let on_url_change = dispatch.reform(|e: Event| {
        let value = e
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        PopupEvent::UrlChanged(value)
    });

    let on_ticket_input = dispatch.reform(|e: InputEvent| {
        let value = e
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        PopupEvent::TicketChanged(value)
    });

    let on_env_change = dispatch.reform(|e: Event| {
        let env = e
            .target_dyn_into::<HtmlSelectElement>()
            .and_then(|select| Environment::from_selection(&select.value()));
        PopupEvent::EnvChanged(env)
    });

    let on_param_edit = dispatch.reform(|(key, value): (String, String)| {
        PopupEvent::ParamEdited { key, value }
    });

    let on_generate = {
        let dispatch = dispatch.clone();

        Callback::from(move |key: String| {
            match generate_token(TOKEN_LENGTH) {
                Ok(value) => dispatch.emit(PopupEvent::ParamEdited { key, value }),
                Err(e) => log::error!("{}", e),
            }
        })
    };

    let on_open = dispatch.reform(|_: MouseEvent| PopupEvent::Open);

    if *loading {
        return html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        };
    }

    let (priority_entries, other_entries) = popup.entries();
    let can_open = popup.can_open();
    let final_url = match popup.final_url() {
        Some(Ok(url)) if can_open => Some(url.to_string()),
        _ => None,
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Preview Launcher"}</h1>

            // URL input
            <div class="field">
                <label class="field-label">{"Page URL"}</label>
                <input
                    id="urlInput"
                    type="text"
                    class="field-input"
                    placeholder="https://www.cardcritics.com/..."
                    value={popup.url_text.clone()}
                    onchange={on_url_change}
                />
            </div>

            if popup.url_error.is_some() {
                <Alert r#type={AlertType::Danger} title={"Invalid URL"} inline={true}>
                    {format!("URL must belong to one of: {}", ALLOWED_DOMAINS.join(", "))}
                </Alert>
            }

            // Query parameters
            if popup.parsed.is_some() {
                <div class="params-section">
                    <ParamGroup
                        title="Priority parameters"
                        entries={priority_entries}
                        on_edit={on_param_edit.clone()}
                        on_generate={Some(on_generate)}
                    />
                    <ParamGroup
                        title="Other parameters"
                        entries={other_entries}
                        on_edit={on_param_edit}
                    />
                </div>
            }

            // Environment
            <div class="field">
                <label class="field-label">{"Environment"}</label>
                <select id="envSelect" class="field-input" onchange={on_env_change}>
                    <option value="" selected={popup.env.is_none()}>{"Select environment"}</option>
                    {for Environment::ALL.iter().map(|env| html! {
                        <option value={env.as_str()} selected={popup.env == Some(*env)}>
                            {env.label()}
                        </option>
                    })}
                </select>
            </div>

            <div class="field">
                <label class="field-label">{"Ticket ID"}</label>
                <input
                    id="ticketInput"
                    type="text"
                    class="field-input"
                    placeholder="JIRA123"
                    value={popup.ticket_id.clone()}
                    oninput={on_ticket_input}
                />
            </div>

            if popup.ticket_error() {
                <Alert r#type={AlertType::Danger} title={"Ticket ID required"} inline={true}>
                    {"Enter a ticket ID to use the ticket environment."}
                </Alert>
            }

            if let Some(err) = popup.open_error.clone() {
                <Alert r#type={AlertType::Danger} title={"Cannot open page"} inline={true}>
                    {err}
                </Alert>
            }

            <Button onclick={on_open} disabled={!can_open} variant={ButtonVariant::Primary} block={true}>
                {"Open Page"}
            </Button>

            if let Some(url) = final_url {
                <p class="final-url">{url}</p>
            }
        </div>
    }
}

fn run_effects(effects: Effects) {
    if let Some(saved) = effects.persist {
        spawn_local(async move {
            if let Err(e) = save_persisted(&saved).await {
                log::error!("{}", e);
            }
        });
    }

    if let Some(url) = effects.open_url {
        openInNewTab(&url);
    }
}

// Helper functions

async fn load_persisted() -> PopupResult<PersistedState> {
    let keys_js = serde_wasm_bindgen::to_value(STORAGE_KEYS)
        .map_err(|e| PopupError::Storage(format!("Failed to serialize keys: {:?}", e)))?;

    let data_js = getStorage(keys_js)
        .await
        .map_err(|e| PopupError::Storage(format!("Failed to get storage: {:?}", e)))?;

    if data_js.is_null() || data_js.is_undefined() {
        Ok(PersistedState::default())
    } else {
        serde_wasm_bindgen::from_value(data_js)
            .map_err(|e| PopupError::Storage(format!("Failed to parse storage: {:?}", e)))
    }
}

async fn save_persisted(state: &PersistedState) -> PopupResult<()> {
    let items_js = serde_wasm_bindgen::to_value(state)
        .map_err(|e| PopupError::Storage(format!("Failed to serialize state: {:?}", e)))?;

    setStorage(items_js)
        .await
        .map_err(|e| PopupError::Storage(format!("Failed to save storage: {:?}", e)))
}
