use yew::prelude::*;

use gestion_core::forms::FormMode;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub titulo: AttrValue,
    pub on_cerrar: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Coquille modale : fond cliquable, Échap ferme.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let cerrar_fondo = {
        let on_cerrar = props.on_cerrar.clone();
        Callback::from(move |_: MouseEvent| on_cerrar.emit(()))
    };
    let detener = Callback::from(|e: MouseEvent| e.stop_propagation());
    let onkeydown = {
        let on_cerrar = props.on_cerrar.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_cerrar.emit(());
            }
        })
    };

    html! {
        <div
            onclick={cerrar_fondo}
            {onkeydown}
            tabindex="-1"
            style="position:fixed; inset:0; background:rgba(0,0,0,0.45); display:flex; align-items:center; justify-content:center; z-index:50;"
        >
            <div
                onclick={detener}
                style="background:#fff; border-radius:8px; padding:1.5rem; width:min(720px, 92vw); max-height:90vh; overflow:auto;"
            >
                <h2 style="margin-top:0;">{ props.titulo.to_string() }</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BotonesModalProps {
    pub modo: FormMode,
    pub on_cancelar: Callback<()>,
    #[prop_or_default]
    pub enviando: bool,
}

/// « Cerrar » en consultation ; « Cancelar » + envoi sinon. Le bouton
/// d'envoi est de type submit, le formulaire englobant gère l'envoi.
#[function_component(BotonesModal)]
pub fn botones_modal(props: &BotonesModalProps) -> Html {
    let cancelar = {
        let on_cancelar = props.on_cancelar.clone();
        Callback::from(move |_| on_cancelar.emit(()))
    };

    html! {
        <div style="display:flex; justify-content:flex-end; gap:0.5rem; margin-top:1.5rem;">
            <button type="button" onclick={cancelar} class="btn-secondary">
                { if props.modo.solo_lectura() { "Cerrar" } else { "Cancelar" } }
            </button>
            if let Some(etiqueta) = props.modo.boton() {
                <button type="submit" disabled={props.enviando} class="btn-primary">
                    { if props.enviando { "Guardando..." } else { etiqueta } }
                </button>
            }
        </div>
    }
}
