use yew::prelude::*;

use gestion_core::Role;

use crate::session::use_session;

#[function_component(Home)]
pub fn home() -> Html {
    let session = use_session();
    let Some(usuario) = (*session).clone() else {
        return Html::default();
    };

    let rol = usuario.rol().map_or_else(|| usuario.role.clone(), |r: Role| r.label().to_string());
    let grupo = usuario
        .grupo
        .as_ref()
        .map_or_else(|| "Sin grupo asignado".to_string(), |g| g.etiqueta());

    html! {
        <div>
            <h1>{ format!("Bienvenido, {}", usuario.email) }</h1>
            <div style="background:#fff; border-radius:8px; padding:1.25rem; box-shadow:0 1px 4px rgba(0,0,0,0.08); max-width:520px;">
                <p><strong>{ "Rol: " }</strong>{ rol }</p>
                <p><strong>{ "Grupo: " }</strong>{ grupo }</p>
            </div>
        </div>
    }
}
