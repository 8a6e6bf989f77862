use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::session::{acceso, Acceso, TipoRuta};

use crate::session::use_session;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub ruta: TipoRuta,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let session = use_session();

    match acceso(props.ruta, (*session).as_ref()) {
        Acceso::Mostrar => html! { <>{ for props.children.iter() }</> },
        Acceso::RedirigirLogin => html! { <Redirect<Route> to={Route::Login} /> },
        Acceso::RedirigirHome => html! { <Redirect<Route> to={Route::Home} /> },
    }
}
