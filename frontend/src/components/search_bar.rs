use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub valor: AttrValue,
    #[prop_or(AttrValue::from("Buscar..."))]
    pub placeholder: AttrValue,
    pub on_cambio: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let oninput = {
        let on_cambio = props.on_cambio.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_cambio.emit(input.value());
            }
        })
    };
    let limpiar = {
        let on_cambio = props.on_cambio.clone();
        Callback::from(move |_| on_cambio.emit(String::new()))
    };

    html! {
        <div style="display:flex; gap:0.5rem; margin-bottom:1rem;">
            <input
                type="text"
                value={props.valor.clone()}
                placeholder={props.placeholder.clone()}
                {oninput}
                style="flex:1; padding:0.5rem; border-radius:4px; border:1px solid #ccc;"
            />
            if !props.valor.is_empty() {
                <button onclick={limpiar} style="padding:0.5rem 0.8rem; border:1px solid #ccc; border-radius:4px; background:#fff; cursor:pointer;">
                    { "✕" }
                </button>
            }
        </div>
    }
}
