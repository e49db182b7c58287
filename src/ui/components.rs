/// Reusable UI components

use yew::prelude::*;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::{Button, ButtonVariant};
use crate::render::ParamEntry;

#[derive(Properties, PartialEq)]
pub struct ParamFieldProps {
    pub entry: ParamEntry,
    pub on_edit: Callback<(String, String)>,
    #[prop_or_default]
    pub on_generate: Option<Callback<String>>,
}

/// One `key [value] (Generate)` row
#[function_component(ParamField)]
pub fn param_field(props: &ParamFieldProps) -> Html {
    let entry = &props.entry;

    let oninput = {
        let key = entry.key.clone();
        props.on_edit.reform(move |e: InputEvent| {
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            (key.clone(), value)
        })
    };

    let generate_button = match (&props.on_generate, entry.can_generate) {
        (Some(on_generate), true) => {
            let key = entry.key.clone();
            html! {
                <Button
                    onclick={on_generate.reform(move |_| key.clone())}
                    variant={ButtonVariant::Secondary}
                >
                    {"Generate"}
                </Button>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="param-row">
            <label class="param-label">{&entry.key}</label>
            <input
                type="text"
                class="param-input"
                value={entry.value.clone()}
                placeholder={if entry.can_generate { "Optional" } else { "" }}
                oninput={oninput}
            />
            {generate_button}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ParamGroupProps {
    pub title: AttrValue,
    pub entries: Vec<ParamEntry>,
    pub on_edit: Callback<(String, String)>,
    #[prop_or_default]
    pub on_generate: Option<Callback<String>>,
}

#[function_component(ParamGroup)]
pub fn param_group(props: &ParamGroupProps) -> Html {
    if props.entries.is_empty() {
        return html! {};
    }

    html! {
        <div class="param-group">
            <h2 class="param-group-title">{props.title.clone()}</h2>
            {for props.entries.iter().map(|entry| html! {
                <ParamField
                    key={entry.key.clone()}
                    entry={entry.clone()}
                    on_edit={props.on_edit.clone()}
                    on_generate={props.on_generate.clone()}
                />
            })}
        </div>
    }
}
