//! Champs de formulaire contrôlés, avec message d'erreur et valeur d'origine.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const INPUT: &str = "width:100%; padding:0.5rem; border-radius:4px; border:1px solid #ccc;";
const INPUT_ERROR: &str = "width:100%; padding:0.5rem; border-radius:4px; border:1px solid #c62828;";

fn estilo(error: &Option<AttrValue>) -> &'static str {
    if error.is_some() { INPUT_ERROR } else { INPUT }
}

fn pie(error: &Option<AttrValue>, original: &Option<AttrValue>) -> Html {
    html! {
        <>
            if let Some(e) = error {
                <small style="color:#c62828;">{ e.to_string() }</small>
            }
            if let Some(o) = original {
                <small style="display:block; color:#777;">{ format!("Valor original: {o}") }</small>
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct CampoProps {
    pub etiqueta: AttrValue,
    pub valor: AttrValue,
    pub on_cambio: Callback<String>,
    #[prop_or(AttrValue::from("text"))]
    pub tipo: AttrValue,
    #[prop_or_default]
    pub requerido: bool,
    #[prop_or_default]
    pub solo_lectura: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub original: Option<AttrValue>,
}

#[function_component(Campo)]
pub fn campo(props: &CampoProps) -> Html {
    let oninput = {
        let on_cambio = props.on_cambio.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_cambio.emit(input.value());
            }
        })
    };

    html! {
        <div class="form-group" style="margin-bottom:0.9rem;">
            <label style="display:block; margin-bottom:0.3rem;">
                { props.etiqueta.to_string() }
                if props.requerido { <span style="color:#c62828;">{ " *" }</span> }
            </label>
            <input
                type={props.tipo.clone()}
                value={props.valor.clone()}
                readonly={props.solo_lectura}
                {oninput}
                style={estilo(&props.error)}
            />
            { pie(&props.error, &props.original) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AreaTextoProps {
    pub etiqueta: AttrValue,
    pub valor: AttrValue,
    pub on_cambio: Callback<String>,
    #[prop_or_default]
    pub solo_lectura: bool,
    #[prop_or_default]
    pub original: Option<AttrValue>,
}

#[function_component(AreaTexto)]
pub fn area_texto(props: &AreaTextoProps) -> Html {
    let oninput = {
        let on_cambio = props.on_cambio.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                on_cambio.emit(area.value());
            }
        })
    };

    html! {
        <div class="form-group" style="margin-bottom:0.9rem;">
            <label style="display:block; margin-bottom:0.3rem;">{ props.etiqueta.to_string() }</label>
            <textarea
                value={props.valor.clone()}
                readonly={props.solo_lectura}
                rows="3"
                {oninput}
                style={INPUT}
            />
            { pie(&None, &props.original) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SeleccionProps {
    pub etiqueta: AttrValue,
    pub valor: AttrValue,
    /// Paires (valeur, libellé).
    pub opciones: Vec<(String, String)>,
    pub on_cambio: Callback<String>,
    #[prop_or(AttrValue::from("Seleccione..."))]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub requerido: bool,
    #[prop_or_default]
    pub solo_lectura: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub original: Option<AttrValue>,
}

#[function_component(Seleccion)]
pub fn seleccion(props: &SeleccionProps) -> Html {
    let onchange = {
        let on_cambio = props.on_cambio.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_cambio.emit(select.value());
        })
    };

    html! {
        <div class="form-group" style="margin-bottom:0.9rem;">
            <label style="display:block; margin-bottom:0.3rem;">
                { props.etiqueta.to_string() }
                if props.requerido { <span style="color:#c62828;">{ " *" }</span> }
            </label>
            <select {onchange} disabled={props.solo_lectura} style={estilo(&props.error)}>
                <option value="" selected={props.valor.is_empty()}>{ props.placeholder.to_string() }</option>
                { for props.opciones.iter().map(|(valor, etiqueta)| html! {
                    <option key={valor.clone()} value={valor.clone()} selected={*valor == *props.valor}>
                        { etiqueta }
                    </option>
                }) }
            </select>
            { pie(&props.error, &props.original) }
        </div>
    }
}
