use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{cerrar, use_session};
use crate::Route;

#[function_component(Logout)]
pub fn logout() -> Html {
    let navigator = use_navigator();
    let session = use_session();

    let onclick = Callback::from(move |_| {
        if !gloo_dialogs::confirm("¿Seguro que querés cerrar sesión?") {
            return;
        }
        log::info!("cierre de sesión");
        cerrar(&session);
        if let Some(navigator) = &navigator {
            navigator.replace(&Route::Login);
        }
    });

    html! {
        <button {onclick} style="background:transparent; border:1px solid #fff; color:#fff; padding:0.4rem 0.8rem; border-radius:4px; cursor:pointer;">
            { "Cerrar sesión" }
        </button>
    }
}
