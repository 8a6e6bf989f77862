use yew::prelude::*;

use gestion_core::crud::Modal as EstadoModal;
use gestion_core::endpoints::Removal;
use gestion_core::forms::{EquipoForm, EquipoPayload, FormContext, FormMode};
use gestion_core::models::{o_guion, Equipo, Keyed};
use gestion_core::{Entidad, FieldErrors};

use super::{acciones, alerta, cabecera, cerrar_modal, error_de, guardar, listado, opciones_grupos, original_si, titulo_modal};
use crate::components::{AreaTexto, BotonesModal, Campo, Columna, Modal, Seleccion};
use crate::config::PAGE_EQUIPOS;
use crate::hooks::{use_entity_page, use_grupos};

#[derive(Properties, PartialEq)]
struct EquipoFormProps {
    modo: FormMode,
    registro: Option<Equipo>,
    ctx: FormContext,
    enviando: bool,
    on_enviar: Callback<EquipoPayload>,
    on_cancelar: Callback<()>,
}

type Setter = fn(&mut EquipoForm, String);

fn valor_original(form: &EquipoForm, campo: &str) -> String {
    match campo {
        "denominacion" => form.denominacion.clone(),
        "descripcion" => form.descripcion.clone(),
        "fechaIncorporacion" => form.fecha_incorporacion.clone(),
        "montoInvertido" => form.monto_invertido.clone(),
        "oidGrupo" => form.oid_grupo.clone(),
        "activo" => (if form.activo { "Sí" } else { "No" }).to_string(),
        _ => String::new(),
    }
}

#[function_component(EquipoFormulario)]
fn equipo_formulario(props: &EquipoFormProps) -> Html {
    let grupos = use_grupos();
    let original = use_memo((props.registro.clone(), props.ctx.clone()), |(r, ctx)| {
        EquipoForm::desde(r.as_ref(), ctx)
    });
    let form = use_state(|| (*original).clone());
    let errores = use_state(FieldErrors::new);

    let solo_lectura = props.modo.solo_lectura();
    let editando = props.modo == FormMode::Editar;
    let modificados = form.modificados(&original);
    let on_campo = |set: Setter| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            set(&mut siguiente, valor);
            form.set(siguiente);
        })
    };
    let original_de = |campo: &str| {
        original_si(
            editando && modificados.iter().any(|m| *m == campo),
            &valor_original(&original, campo),
        )
    };

    let onsubmit = {
        let form = form.clone();
        let errores = errores.clone();
        let on_enviar = props.on_enviar.clone();
        let ctx = props.ctx.clone();
        let modo = props.modo;
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if modo.solo_lectura() {
                return;
            }
            match form.validar(&ctx, modo) {
                Ok(payload) => {
                    errores.set(FieldErrors::new());
                    on_enviar.emit(payload);
                }
                Err(e) => errores.set(e),
            }
        })
    };

    let activo = if form.activo { "true" } else { "false" };
    let opciones_activo = vec![("true".to_string(), "Sí".to_string()), ("false".to_string(), "No".to_string())];

    html! {
        <form {onsubmit}>
            <Campo etiqueta="Denominación" valor={form.denominacion.clone()}
                on_cambio={on_campo(|f, v| f.denominacion = v)} requerido=true {solo_lectura}
                error={error_de(&errores, "denominacion")} original={original_de("denominacion")} />
            <AreaTexto etiqueta="Descripción" valor={form.descripcion.clone()}
                on_cambio={on_campo(|f, v| f.descripcion = v)} {solo_lectura}
                original={original_de("descripcion")} />
            <Campo etiqueta="Fecha de incorporación" tipo="date" valor={form.fecha_incorporacion.clone()}
                on_cambio={on_campo(|f, v| f.fecha_incorporacion = v)} {solo_lectura}
                original={original_de("fechaIncorporacion")} />
            <Campo etiqueta="Monto invertido" tipo="number" valor={form.monto_invertido.clone()}
                on_cambio={on_campo(|f, v| f.monto_invertido = v)} {solo_lectura}
                error={error_de(&errores, "montoInvertido")} original={original_de("montoInvertido")} />
            if props.ctx.ve_varios_grupos() {
                <Seleccion etiqueta="Grupo" valor={form.oid_grupo.clone()} opciones={opciones_grupos(&grupos)}
                    on_cambio={on_campo(|f, v| f.oid_grupo = v)} requerido=true {solo_lectura}
                    error={error_de(&errores, "oidGrupo")} original={original_de("oidGrupo")} />
            }
            <Seleccion etiqueta="Activo" valor={activo} opciones={opciones_activo} placeholder="-"
                on_cambio={on_campo(|f, v| f.activo = v == "true")} {solo_lectura}
                original={original_de("activo")} />
            <BotonesModal modo={props.modo} on_cancelar={props.on_cancelar.clone()} enviando={props.enviando} />
        </form>
    }
}

#[function_component(EquiposPage)]
pub fn equipos_page() -> Html {
    let page = use_entity_page::<Equipo>(Entidad::Equipos, PAGE_EQUIPOS);

    let mut columnas = vec![
        Columna::texto("denominacion", "Denominación", |e: &Equipo| e.denominacion.clone()),
        Columna::texto("descripcion", "Descripción", |e: &Equipo| o_guion(e.descripcion.as_deref())),
        Columna::texto("fechaIncorporacion", "Incorporación", |e: &Equipo| {
            o_guion(e.fecha_incorporacion.as_deref())
        }),
        Columna::texto("montoInvertido", "Monto", |e: &Equipo| {
            e.monto_invertido.map_or_else(|| "-".to_string(), |m| format!("$ {m:.2}"))
        }),
    ];
    if page.ve_varios_grupos() {
        columnas.push(Columna::texto("grupo", "Grupo", |e: &Equipo| o_guion(e.nombre_del_grupo())));
    }
    columnas.push(Columna::texto("activo", "Activo", |e: &Equipo| {
        (if e.activo { "Sí" } else { "No" }).to_string()
    }));

    let confirmacion = if page.endpoints.removal() == Some(Removal::Eliminar) {
        "¿Seguro que querés eliminar este equipo?"
    } else {
        "¿Seguro que querés quitar este equipo?"
    };
    let acciones = acciones(&page, confirmacion.to_string(), None);

    let modal = match &page.state().modal {
        EstadoModal::Cerrado => Html::default(),
        EstadoModal::Abierto { modo, registro } => {
            let modo = *modo;
            let on_enviar = {
                let page = page.clone();
                let id = registro.as_ref().map(Keyed::key);
                Callback::from(move |payload: EquipoPayload| {
                    let grupo = payload.grupo;
                    guardar(&page, modo, id, grupo, payload)
                })
            };
            html! {
                <Modal titulo={titulo_modal(modo, "Equipo")} on_cerrar={cerrar_modal(&page)}>
                    <EquipoFormulario {modo} registro={registro.clone()} ctx={page.ctx()}
                        enviando={page.state().enviando} {on_enviar} on_cancelar={cerrar_modal(&page)} />
                </Modal>
            }
        }
    };

    html! {
        <div>
            { cabecera(&page, "Equipamiento", "Nuevo Equipo") }
            { listado(&page, columnas, acciones, "No hay equipos para mostrar") }
            { modal }
            { alerta(&page) }
        </div>
    }
}
