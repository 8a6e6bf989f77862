use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::models::TipoPersona;

use crate::logout;
use crate::session::use_session;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    #[prop_or_default]
    pub children: Children,
}

const ITEM: &str = "display:block; padding:0.55rem 1rem; color:#e8eaf6; text-decoration:none;";

fn enlace(to: Route, texto: &'static str, actual: &Option<Route>) -> Html {
    let activo = actual.as_ref() == Some(&to);
    let estilo = if activo { format!("{ITEM} background:#303f9f;") } else { ITEM.to_string() };
    html! {
        <li><Link<Route> {to} classes={classes!(activo.then_some("activo"))}>
            <span style={estilo}>{ texto }</span>
        </Link<Route>></li>
    }
}

#[function_component(MainLayout)]
pub fn main_layout(props: &MainLayoutProps) -> Html {
    let session = use_session();
    let actual = use_route::<Route>();
    let personal_abierto = use_state(|| matches!(actual, Some(Route::Personas { .. })));

    let toggle_personal = {
        let personal_abierto = personal_abierto.clone();
        Callback::from(move |_| personal_abierto.set(!*personal_abierto))
    };

    let (email, es_admin) = match &*session {
        Some(u) => (u.email.clone(), u.is_admin()),
        None => (String::new(), false),
    };

    html! {
        <div style="display:flex; min-height:100vh; font-family:sans-serif;">
            /* ---------------- barre latérale ---------------- */
            <aside style="width:240px; background:#1a237e; color:#fff; display:flex; flex-direction:column;">
                <div style="padding:1.2rem 1rem; font-weight:bold; font-size:1.1rem;">{ "Grupos de Investigación" }</div>
                <nav style="flex:1;">
                    <ul style="list-style:none; margin:0; padding:0;">
                        { enlace(Route::Home, "Inicio", &actual) }
                        { enlace(Route::Documentos, "Documentos", &actual) }
                        <li>
                            <span onclick={toggle_personal} style={format!("{ITEM} cursor:pointer;")}>
                                { if *personal_abierto { "Personal ▾" } else { "Personal ▸" } }
                            </span>
                            if *personal_abierto {
                                <ul style="list-style:none; margin:0; padding-left:1rem;">
                                    { for TipoPersona::ALL.into_iter().map(|tipo| enlace(
                                        Route::Personas { tipo: tipo.entidad().as_str().to_string() },
                                        tipo.plural(),
                                        &actual,
                                    )) }
                                </ul>
                            }
                        </li>
                        { enlace(Route::Grupos, "Grupos", &actual) }
                        { enlace(Route::Equipos, "Equipo", &actual) }
                        { enlace(Route::Memorias, "Memorias", &actual) }
                        if es_admin {
                            { enlace(Route::Usuarios, "Usuarios", &actual) }
                        }
                    </ul>
                </nav>
                <div style="padding:1rem; border-top:1px solid #3949ab;">
                    <div style="font-size:0.85rem; margin-bottom:0.5rem; word-break:break-all;">{ email }</div>
                    <logout::Logout />
                </div>
            </aside>

            <main style="flex:1; padding:2rem; background:#fafafa;">
                { for props.children.iter() }
            </main>
        </div>
    }
}
