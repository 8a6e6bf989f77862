use yew::prelude::*;

use gestion_core::Alerta;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub alerta: Option<Alerta>,
    pub on_cerrar: Callback<()>,
}

#[function_component(AlertDialog)]
pub fn alert_dialog(props: &AlertProps) -> Html {
    let Some(alerta) = &props.alerta else {
        return Html::default();
    };
    let aceptar = {
        let on_cerrar = props.on_cerrar.clone();
        Callback::from(move |_| on_cerrar.emit(()))
    };
    let color = alerta.tipo.color();

    html! {
        <div
            class={classes!("alerta", alerta.tipo.clase())}
            style="position:fixed; inset:0; background:rgba(0,0,0,0.35); display:flex; align-items:center; justify-content:center; z-index:60;"
        >
            <div style={format!("background:#fff; border-top:6px solid {color}; border-radius:8px; padding:1.25rem 1.5rem; width:min(420px, 90vw);")}>
                <h3 style={format!("margin:0 0 0.5rem; color:{color};")}>{ &alerta.titulo }</h3>
                <p style="white-space:pre-wrap;">{ &alerta.mensaje }</p>
                <div style="text-align:right;">
                    <button onclick={aceptar} class="btn-primary">{ "Aceptar" }</button>
                </div>
            </div>
        </div>
    }
}
