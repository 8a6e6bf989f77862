use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gestion_core::auth::crear_usuario;
use gestion_core::forms::{FormContext, UsuarioForm};
use gestion_core::models::TipoPersona;
use gestion_core::{Alerta, FieldErrors, Role};

use super::personas::campos_variante;
use super::{error_de, opciones_grupos, BOTON_PRIMARIO};
use crate::api::anio_actual;
use crate::components::{AlertDialog, Campo, Seleccion};
use crate::config::API_BASE;
use crate::hooks::use_grupos;
use crate::session::{use_client, use_session};

type Setter = fn(&mut UsuarioForm, String);

/// Création d'un compte : la personne est créée dans le groupe choisi, puis
/// le compte lui est associé.
#[function_component(UsuariosPage)]
pub fn usuarios_page() -> Html {
    let session = use_session();
    let client = use_client();
    let grupos = use_grupos();
    let form = use_state(UsuarioForm::default);
    let errores = use_state(FieldErrors::new);
    let enviando = use_state(|| false);
    let alerta = use_state(|| None::<Alerta>);

    let ctx = (*session)
        .as_ref()
        .map(|u| FormContext::new(u, anio_actual()));

    let on_campo = |set: Setter| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            set(&mut siguiente, valor);
            form.set(siguiente);
        })
    };
    let on_persona = |campo: &'static str| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            siguiente.persona.set(campo, valor);
            form.set(siguiente);
        })
    };

    let onsubmit = {
        let (form, errores, enviando, alerta) = (form.clone(), errores.clone(), enviando.clone(), alerta.clone());
        let ctx = ctx.clone();
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(ctx) = &ctx else { return };
            let envio = match form.validar(ctx) {
                Ok(envio) => envio,
                Err(e) => {
                    errores.set(e);
                    return;
                }
            };
            errores.set(FieldErrors::new());
            enviando.set(true);

            let (client, form, enviando, alerta) = (client.clone(), form.clone(), enviando.clone(), alerta.clone());
            spawn_local(async move {
                match crear_usuario(&client, API_BASE, &envio).await {
                    Ok(mensaje) => {
                        info!("usuario creado : {}", envio.email);
                        form.set(UsuarioForm::default());
                        alerta.set(Some(Alerta::exito(mensaje)));
                    }
                    Err(e) => {
                        error!("creación de usuario : {e}");
                        alerta.set(Some(Alerta::desde_error(&e)));
                    }
                }
                enviando.set(false);
            });
        })
    };

    let cerrar_alerta = {
        let alerta = alerta.clone();
        Callback::from(move |_| alerta.set(None))
    };

    let roles = Role::ALL
        .into_iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect::<Vec<_>>();
    let tipos = TipoPersona::ALL
        .into_iter()
        .map(|t| (t.as_str().to_string(), t.singular().to_string()))
        .collect::<Vec<_>>();

    html! {
        <div style="max-width:720px;">
            <h1>{ "Crear Usuario" }</h1>
            <form {onsubmit} style="background:#fff; padding:1.5rem; border-radius:8px; box-shadow:0 1px 4px rgba(0,0,0,0.08);">
                <h3 style="margin-top:0;">{ "Cuenta" }</h3>
                <Campo etiqueta="Email" tipo="email" valor={form.email.clone()} requerido=true
                    on_cambio={on_campo(|f, v| f.email = v)} error={error_de(&errores, "email")} />
                <Campo etiqueta="Contraseña" tipo="password" valor={form.password.clone()} requerido=true
                    on_cambio={on_campo(|f, v| f.password = v)} error={error_de(&errores, "password")} />
                <Campo etiqueta="Confirmar contraseña" tipo="password" valor={form.confirmar.clone()} requerido=true
                    on_cambio={on_campo(|f, v| f.confirmar = v)} error={error_de(&errores, "confirmar")} />
                <Seleccion etiqueta="Rol" valor={form.role.map(Role::as_str).unwrap_or_default()} opciones={roles}
                    requerido=true on_cambio={on_campo(|f, v| f.role = Role::parse(&v))} error={error_de(&errores, "role")} />
                <Seleccion etiqueta="Grupo" valor={form.oid_grupo.clone()} opciones={opciones_grupos(&grupos)}
                    requerido=true on_cambio={on_campo(|f, v| f.oid_grupo = v)} error={error_de(&errores, "oidGrupo")} />

                <h3>{ "Persona" }</h3>
                <Seleccion etiqueta="Tipo de persona" valor={form.tipo_persona.map(TipoPersona::as_str).unwrap_or_default()}
                    opciones={tipos} requerido=true on_cambio={on_campo(|f, v| f.set_tipo(TipoPersona::parse(&v)))}
                    error={error_de(&errores, "tipoPersona")} />
                <Campo etiqueta="Nombre" valor={form.persona.nombre.clone()} on_cambio={on_persona("nombre")}
                    error={error_de(&errores, "nombre")} />
                <Campo etiqueta="Apellido" valor={form.persona.apellido.clone()} on_cambio={on_persona("apellido")}
                    error={error_de(&errores, "apellido")} />
                <Campo etiqueta="Horas semanales" tipo="number" valor={form.persona.horas_semanales.clone()}
                    on_cambio={on_persona("horasSemanales")} error={error_de(&errores, "horasSemanales")} />
                if form.tipo_persona.is_some() {
                    { campos_variante(&form.persona, on_persona, false, &errores) }
                }

                <div style="text-align:right; margin-top:1rem;">
                    <button type="submit" disabled={*enviando} style={BOTON_PRIMARIO}>
                        { if *enviando { "Creando..." } else { "Crear Usuario" } }
                    </button>
                </div>
            </form>
            <AlertDialog alerta={(*alerta).clone()} on_cerrar={cerrar_alerta} />
        </div>
    }
}
