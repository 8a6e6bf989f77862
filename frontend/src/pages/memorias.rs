use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::crud::{Modal as EstadoModal, PageAction};
use gestion_core::download::descarga_memoria;
use gestion_core::forms::{FormContext, FormMode, MemoriaForm};
use gestion_core::memoria::MemoriaService;
use gestion_core::models::{Keyed, Memoria};
use gestion_core::{Alerta, Entidad, FieldErrors, Oid};

use super::{alerta, cabecera, cerrar_modal, error_de, listado, opciones_grupos, BOTON};
use crate::api::guardar;
use crate::components::{BotonesModal, Campo, Columna, Modal, Seleccion};
use crate::config::{API_BASE, PAGE_MEMORIAS};
use crate::hooks::{use_entity_page, use_grupos, EntityPage};
use crate::Route;

/* -------------------------------------------------------------------------- */
/*                           création d'une mémoire                            */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
struct MemoriaFormProps {
    ctx: FormContext,
    enviando: bool,
    on_enviar: Callback<(i32, Option<Oid>)>,
    on_cancelar: Callback<()>,
}

#[function_component(MemoriaFormulario)]
fn memoria_formulario(props: &MemoriaFormProps) -> Html {
    let grupos = use_grupos();
    let anio = props.ctx.anio_actual;
    let form = use_state(move || MemoriaForm::nueva(anio));
    let errores = use_state(FieldErrors::new);

    let on_anio = {
        let form = form.clone();
        Callback::from(move |valor: String| form.set(MemoriaForm { anio: valor, ..(*form).clone() }))
    };
    let on_grupo = {
        let form = form.clone();
        Callback::from(move |valor: String| form.set(MemoriaForm { oid_grupo: valor, ..(*form).clone() }))
    };

    let onsubmit = {
        let form = form.clone();
        let errores = errores.clone();
        let on_enviar = props.on_enviar.clone();
        let ctx = props.ctx.clone();
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            match form.validar(&ctx) {
                Ok(datos) => {
                    errores.set(FieldErrors::new());
                    on_enviar.emit(datos);
                }
                Err(e) => errores.set(e),
            }
        })
    };

    html! {
        <form {onsubmit}>
            <Campo etiqueta="Año" tipo="number" valor={form.anio.clone()} on_cambio={on_anio}
                requerido=true error={error_de(&errores, "anio")} />
            if props.ctx.ve_varios_grupos() {
                <Seleccion etiqueta="Grupo" valor={form.oid_grupo.clone()} opciones={opciones_grupos(&grupos)}
                    on_cambio={on_grupo} requerido=true error={error_de(&errores, "oidGrupo")} />
            }
            <BotonesModal modo={FormMode::Crear} on_cancelar={props.on_cancelar.clone()} enviando={props.enviando} />
        </form>
    }
}

/* -------------------------------------------------------------------------- */
/*                 actions : consulter, gérer, exporter                        */
/* -------------------------------------------------------------------------- */

fn exportar(page: &EntityPage<Memoria>, id: Oid) -> Callback<MouseEvent> {
    let (client, endpoints, estado) = (page.client.clone(), page.endpoints.clone(), page.estado.clone());
    Callback::from(move |_| {
        let (client, endpoints, estado) = (client.clone(), endpoints.clone(), estado.clone());
        spawn_local(async move {
            match MemoriaService::new(&client, &endpoints, API_BASE).exportar(id).await {
                Ok(respuesta) => {
                    let descarga = descarga_memoria(respuesta, id);
                    info!("export de {}", descarga.nombre);
                    if let Err(e) = guardar(&descarga) {
                        error!("enregistrement impossible : {e:?}");
                    }
                }
                Err(e) => {
                    error!("memoria {id} : {e}");
                    estado.dispatch(PageAction::Alertar(Alerta::desde_error(&e)));
                }
            }
        });
    })
}

fn acciones(page: &EntityPage<Memoria>, navigator: Option<Navigator>) -> Callback<Memoria, Html> {
    let page = page.clone();
    Callback::from(move |memoria: Memoria| {
        let id = memoria.key();
        let ir = |gestionar: bool| {
            let navigator = navigator.clone();
            Callback::from(move |_| {
                let Some(nav) = &navigator else { return };
                let ruta = Route::MemoriaDetalle { id };
                if !gestionar {
                    nav.push(&ruta);
                } else if let Err(e) = nav.push_with_query(&ruta, &[("modo", "editar")]) {
                    error!("navigation : {e}");
                }
            })
        };

        html! {
            <div style="white-space:nowrap;">
                <button onclick={ir(false)} style={BOTON}>{ "Ver" }</button>
                if page.puede_editar() {
                    <button onclick={ir(true)} style={BOTON}>{ "Gestionar" }</button>
                }
                if page.endpoints.descargar(id).is_some() {
                    <button onclick={exportar(&page, id)} style={BOTON}>{ "Exportar" }</button>
                }
            </div>
        }
    })
}

/* -------------------------------------------------------------------------- */
/*                                    page                                     */
/* -------------------------------------------------------------------------- */

#[function_component(MemoriasPage)]
pub fn memorias_page() -> Html {
    let page = use_entity_page::<Memoria>(Entidad::Memorias, PAGE_MEMORIAS);
    let navigator = use_navigator();

    let columnas = vec![
        Columna::texto("anio", "Año", |m: &Memoria| m.anio.map_or_else(|| "-".to_string(), |a| a.to_string())),
        Columna::texto("grupo", "Grupo", |m: &Memoria| {
            m.grupo.as_ref().map_or_else(|| "-".to_string(), |g| g.etiqueta())
        }),
    ];

    let modal = match &page.state().modal {
        EstadoModal::Abierto { modo: FormMode::Crear, .. } => {
            let on_enviar = {
                let page = page.clone();
                Callback::from(move |(anio, grupo): (i32, Option<Oid>)| {
                    page.escribir("Memoria creada correctamente", move |client, endpoints| async move {
                        MemoriaService::new(&client, &endpoints, API_BASE).crear(grupo, anio).await
                    })
                })
            };
            html! {
                <Modal titulo="Nueva Memoria" on_cerrar={cerrar_modal(&page)}>
                    <MemoriaFormulario ctx={page.ctx()} enviando={page.state().enviando}
                        {on_enviar} on_cancelar={cerrar_modal(&page)} />
                </Modal>
            }
        }
        _ => Html::default(),
    };

    html! {
        <div>
            { cabecera(&page, "Memorias", "Nueva Memoria") }
            { listado(&page, columnas, acciones(&page, navigator), "No hay memorias para mostrar") }
            { modal }
            { alerta(&page) }
        </div>
    }
}
