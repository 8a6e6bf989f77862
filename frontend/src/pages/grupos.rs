use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gestion_core::crud::{todas_las_personas, Modal as EstadoModal};
use gestion_core::forms::{FormMode, GrupoForm, GrupoPayload};
use gestion_core::models::{o_guion, Grupo, Keyed, Persona};
use gestion_core::{Entidad, FieldErrors};

use super::{acciones, alerta, cabecera, cerrar_modal, error_de, guardar, listado, original_si, titulo_modal};
use crate::components::{AreaTexto, BotonesModal, Campo, Columna, Modal, Seleccion};
use crate::config::{API_BASE, PAGE_GRUPOS};
use crate::hooks::use_entity_page;
use crate::session::{use_client, use_session};

/* -------------------------------------------------------------------------- */
/*                                 formulaire                                  */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
struct GrupoFormProps {
    modo: FormMode,
    registro: Option<Grupo>,
    enviando: bool,
    on_enviar: Callback<GrupoPayload>,
    on_cancelar: Callback<()>,
}

/// Le directeur peut arriver sous forme d'identifiant ou de libellé.
fn opciones_personas(candidatos: Vec<&Persona>, actual: &str) -> Vec<(String, String)> {
    let mut opciones: Vec<(String, String)> = candidatos
        .into_iter()
        .map(|p| (p.key().to_string(), p.nombre_completo()))
        .collect();
    if !actual.is_empty() && !opciones.iter().any(|(v, _)| v == actual) {
        opciones.push((actual.to_string(), actual.to_string()));
    }
    opciones
}

#[function_component(GrupoFormulario)]
fn grupo_formulario(props: &GrupoFormProps) -> Html {
    let session = use_session();
    let client = use_client();
    let original = use_memo(props.registro.clone(), |r| GrupoForm::desde(r.as_ref()));
    let form = use_state(|| (*original).clone());
    let errores = use_state(FieldErrors::new);
    let personas = use_state(Vec::<Persona>::new);

    {
        let personas = personas.clone();
        let role = (*session).as_ref().map(|u| u.role.clone()).unwrap_or_default();
        use_effect_with((), move |_| {
            spawn_local(async move {
                personas.set(todas_las_personas(&client, API_BASE, &role).await);
            });
            || ()
        });
    }

    let solo_lectura = props.modo.solo_lectura();
    let editando = props.modo == FormMode::Editar;
    let modificados = form.modificados(&original);
    let on_campo = |campo: &'static str| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            siguiente.set(campo, valor);
            form.set(siguiente);
        })
    };
    let original_de = |campo: &str| {
        original_si(editando && modificados.iter().any(|m| *m == campo), original.get(campo))
    };

    let onsubmit = {
        let form = form.clone();
        let errores = errores.clone();
        let on_enviar = props.on_enviar.clone();
        let modo = props.modo;
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if modo.solo_lectura() {
                return;
            }
            match form.validar() {
                Ok(payload) => {
                    errores.set(FieldErrors::new());
                    on_enviar.emit(payload);
                }
                Err(e) => errores.set(e),
            }
        })
    };

    html! {
        <form {onsubmit}>
            if editando && !modificados.is_empty() {
                <p style="color:#ef6c00;">{ format!("Campos modificados: {}", modificados.len()) }</p>
            }
            <Campo etiqueta="Nombre del grupo" valor={form.nombre_grupo.clone()} on_cambio={on_campo("nombreGrupo")}
                requerido=true {solo_lectura} error={error_de(&errores, "nombreGrupo")} original={original_de("nombreGrupo")} />
            <Campo etiqueta="Sigla de la facultad" valor={form.sigla.clone()} on_cambio={on_campo("sigla")}
                requerido=true {solo_lectura} error={error_de(&errores, "sigla")} original={original_de("sigla")} />
            <Campo etiqueta="Email" tipo="email" valor={form.email.clone()} on_cambio={on_campo("email")}
                requerido=true {solo_lectura} error={error_de(&errores, "email")} original={original_de("email")} />
            <Seleccion etiqueta="Director" valor={form.director.clone()}
                opciones={opciones_personas(form.opciones_director(&personas), &form.director)}
                on_cambio={on_campo("director")} {solo_lectura} placeholder="Sin director"
                error={error_de(&errores, "director")} original={original_de("director")} />
            <Seleccion etiqueta="Vicedirector" valor={form.vice_director.clone()}
                opciones={opciones_personas(form.opciones_vice(&personas), &form.vice_director)}
                on_cambio={on_campo("viceDirector")} {solo_lectura} placeholder="Sin vicedirector"
                error={error_de(&errores, "viceDirector")} original={original_de("viceDirector")} />
            <AreaTexto etiqueta="Objetivos" valor={form.objetivos.clone()} on_cambio={on_campo("objetivos")}
                {solo_lectura} original={original_de("objetivos")} />
            <Campo etiqueta="Organigrama" valor={form.organigrama.clone()} on_cambio={on_campo("organigrama")}
                {solo_lectura} original={original_de("organigrama")} />
            <BotonesModal modo={props.modo} on_cancelar={props.on_cancelar.clone()} enviando={props.enviando} />
        </form>
    }
}

/* -------------------------------------------------------------------------- */
/*                                    page                                     */
/* -------------------------------------------------------------------------- */

#[function_component(GruposPage)]
pub fn grupos_page() -> Html {
    let page = use_entity_page::<Grupo>(Entidad::Grupos, PAGE_GRUPOS);

    let columnas = vec![
        Columna::texto("oidGrupo", "ID", |g: &Grupo| g.oid_grupo.to_string()),
        Columna::texto("nombreGrupo", "Nombre", |g: &Grupo| g.nombre_grupo.clone()),
        Columna::texto("sigla", "Sigla", |g: &Grupo| g.sigla.clone()),
        Columna::texto("email", "Email", |g: &Grupo| g.email.clone()),
        Columna::texto("director", "Director", |g: &Grupo| o_guion(g.director.as_deref())),
    ];
    let acciones = acciones(&page, "¿Seguro que querés eliminar este grupo?".to_string(), None);

    let modal = match &page.state().modal {
        EstadoModal::Cerrado => Html::default(),
        EstadoModal::Abierto { modo, registro } => {
            let modo = *modo;
            let on_enviar = {
                let page = page.clone();
                let id = registro.as_ref().map(Keyed::key);
                Callback::from(move |payload: GrupoPayload| guardar(&page, modo, id, None, payload))
            };
            html! {
                <Modal titulo={titulo_modal(modo, "Grupo")} on_cerrar={cerrar_modal(&page)}>
                    <GrupoFormulario {modo} registro={registro.clone()} enviando={page.state().enviando}
                        {on_enviar} on_cancelar={cerrar_modal(&page)} />
                </Modal>
            }
        }
    };

    html! {
        <div>
            { cabecera(&page, "Grupos de Investigación", "Nuevo Grupo") }
            { listado(&page, columnas, acciones, "No hay grupos para mostrar") }
            { modal }
            { alerta(&page) }
        </div>
    }
}
