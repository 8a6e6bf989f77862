use gloo_timers::future::TimeoutFuture;
use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::auth;
use gestion_core::forms::{LoginForm, RegistroForm};
use gestion_core::{Alerta, TipoAlerta};

use crate::api::GlooBackend;
use crate::components::AlertDialog;
use crate::config::{API_BASE, REDIRECCION_REGISTRO_MS};
use crate::session::{iniciar, use_session};
use crate::Route;

fn on_texto(estado: &UseStateHandle<String>) -> Callback<InputEvent> {
    let estado = estado.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            estado.set(input.value());
        }
    })
}

const CAJA: &str = "max-width:380px; margin:8vh auto; background:#fff; padding:2rem; border-radius:8px; box-shadow:0 2px 12px rgba(0,0,0,0.12); font-family:sans-serif;";
const INPUT: &str = "width:100%; padding:0.55rem; margin:0.3rem 0 0.9rem; border-radius:4px; border:1px solid #ccc;";
const BOTON: &str = "width:100%; padding:0.7rem; background:#3f51b5; color:#fff; border:none; border-radius:4px; font-size:1rem; cursor:pointer;";

/* -------------------------------------------------------------------------- */
/*                               connexion                                     */
/* -------------------------------------------------------------------------- */

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let alerta = use_state(|| None::<Alerta>);

    let onsubmit = {
        let (email, password, alerta) = (email.clone(), password.clone(), alerta.clone());
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let form = LoginForm { email: (*email).clone(), password: (*password).clone() };
            let form = match form.validar() {
                Ok(f) => f,
                Err(errores) => {
                    alerta.set(Some(Alerta::error(errores.to_string())));
                    return;
                }
            };

            let (session, navigator, alerta) = (session.clone(), navigator.clone(), alerta.clone());
            spawn_local(async move {
                match auth::login(&GlooBackend, API_BASE, &form).await {
                    Ok(usuario) => {
                        iniciar(&session, usuario);
                        if let Some(nav) = navigator {
                            nav.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        error!("login: {e}");
                        let mut aviso = Alerta::desde_error(&e);
                        if aviso.tipo == TipoAlerta::Error {
                            aviso.titulo = "Error de Inicio de Sesión".into();
                        }
                        alerta.set(Some(aviso));
                    }
                }
            });
        })
    };

    let cerrar_alerta = {
        let alerta = alerta.clone();
        Callback::from(move |_| alerta.set(None))
    };

    html! {
        <div style={CAJA}>
            <h1 style="margin-top:0;">{ "Iniciar Sesión" }</h1>
            <form {onsubmit}>
                <label>{ "Email:" }
                    <input type="email" placeholder="example@mail.com" value={(*email).clone()} oninput={on_texto(&email)} style={INPUT} />
                </label>
                <label>{ "Contraseña:" }
                    <input type="password" value={(*password).clone()} oninput={on_texto(&password)} style={INPUT} />
                </label>
                <button type="submit" style={BOTON}>{ "Ingresar" }</button>
            </form>
            <p style="text-align:center;">
                { "¿No tenés cuenta? " }
                <Link<Route> to={Route::Registro}>{ "Registrate" }</Link<Route>>
            </p>
            <AlertDialog alerta={(*alerta).clone()} on_cerrar={cerrar_alerta} />
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                               inscription                                   */
/* -------------------------------------------------------------------------- */

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirmar = use_state(String::new);
    let alerta = use_state(|| None::<Alerta>);

    let onsubmit = {
        let (email, password, confirmar, alerta) =
            (email.clone(), password.clone(), confirmar.clone(), alerta.clone());
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let form = RegistroForm {
                email: (*email).clone(),
                password: (*password).clone(),
                confirmar: (*confirmar).clone(),
            };
            let credenciales = match form.validar() {
                Ok(c) => c,
                Err(errores) => {
                    alerta.set(Some(Alerta::error(errores.to_string())));
                    return;
                }
            };

            let (navigator, alerta) = (navigator.clone(), alerta.clone());
            spawn_local(async move {
                match auth::register(&GlooBackend, API_BASE, &credenciales).await {
                    Ok(()) => {
                        info!("registro exitoso: {}", credenciales.email);
                        alerta.set(Some(Alerta::new(
                            TipoAlerta::Exito,
                            "Registro Exitoso",
                            "Redirigiendo al inicio de sesión...",
                        )));
                        TimeoutFuture::new(REDIRECCION_REGISTRO_MS).await;
                        if let Some(nav) = navigator {
                            nav.push(&Route::Login);
                        }
                    }
                    Err(e) => {
                        error!("registro: {e}");
                        let mut aviso = Alerta::desde_error(&e);
                        if aviso.tipo == TipoAlerta::Error {
                            aviso.titulo = "Error de Registro".into();
                        }
                        alerta.set(Some(aviso));
                    }
                }
            });
        })
    };

    let cerrar_alerta = {
        let alerta = alerta.clone();
        Callback::from(move |_| alerta.set(None))
    };

    html! {
        <div style={CAJA}>
            <h1 style="margin-top:0;">{ "Crear Cuenta" }</h1>
            <form {onsubmit}>
                <label>{ "Email:" }
                    <input type="email" value={(*email).clone()} oninput={on_texto(&email)} style={INPUT} />
                </label>
                <label>{ "Contraseña:" }
                    <input type="password" value={(*password).clone()} oninput={on_texto(&password)} style={INPUT} />
                </label>
                <label>{ "Confirmar contraseña:" }
                    <input type="password" value={(*confirmar).clone()} oninput={on_texto(&confirmar)} style={INPUT} />
                </label>
                <button type="submit" style={BOTON}>{ "Registrarse" }</button>
            </form>
            <p style="text-align:center;">
                { "¿Ya tenés cuenta? " }
                <Link<Route> to={Route::Login}>{ "Iniciá sesión" }</Link<Route>>
            </p>
            <AlertDialog alerta={(*alerta).clone()} on_cerrar={cerrar_alerta} />
        </div>
    }
}
