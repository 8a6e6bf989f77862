use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::session::TipoRuta;

mod api;
mod auth;
mod components;
mod config;
mod guard;
mod hooks;
mod layout;
mod logout;
mod pages;
mod session;

use guard::Guard;
use layout::MainLayout;
use session::SessionProvider;

/* -------------------- routing -------------------- */

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Raiz,
    #[at("/login")]
    Login,
    #[at("/register")]
    Registro,
    #[at("/home")]
    Home,
    #[at("/grupos")]
    Grupos,
    #[at("/equipos")]
    Equipos,
    #[at("/documentos")]
    Documentos,
    #[at("/personas/:tipo")]
    Personas { tipo: String },
    #[at("/memorias")]
    Memorias,
    #[at("/memorias/:id")]
    MemoriaDetalle { id: i64 },
    #[at("/usuarios")]
    Usuarios,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn publica(contenido: Html) -> Html {
    html! { <Guard ruta={TipoRuta::Publica}>{ contenido }</Guard> }
}

fn protegida(contenido: Html) -> Html {
    html! {
        <Guard ruta={TipoRuta::Protegida}>
            <MainLayout>{ contenido }</MainLayout>
        </Guard>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Raiz => html!(<Redirect<Route> to={Route::Home} />),
        Route::Login => publica(html!(<auth::LoginPage />)),
        Route::Registro => publica(html!(<auth::RegisterPage />)),
        Route::Home => protegida(html!(<pages::Home />)),
        Route::Grupos => protegida(html!(<pages::GruposPage />)),
        Route::Equipos => protegida(html!(<pages::EquiposPage />)),
        Route::Documentos => protegida(html!(<pages::DocumentosPage />)),
        Route::Personas { tipo } => protegida(html!(<pages::PersonasPage {tipo} />)),
        Route::Memorias => protegida(html!(<pages::MemoriasPage />)),
        Route::MemoriaDetalle { id } => protegida(html!(<pages::MemoriaDetallePage {id} />)),
        Route::Usuarios => html! {
            <Guard ruta={TipoRuta::Admin}>
                <MainLayout><pages::UsuariosPage /></MainLayout>
            </Guard>
        },
        Route::NotFound => html!(<h1>{"404 – Página no encontrada"}</h1>),
    }
}

/* -------------------- entry point ---------------- */

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </SessionProvider>
    }
}

fn main() {
    let nivel = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(nivel));
    yew::Renderer::<App>::new().render();
}
