use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use gestion_core::crud::{CrudService, Modal as EstadoModal, PageAction};
use gestion_core::download::descarga_documento;
use gestion_core::endpoints::Removal;
use gestion_core::forms::{DocumentoEnvio, DocumentoForm, Escritura, FormContext, FormMode};
use gestion_core::http::Archivo;
use gestion_core::models::{o_guion, Documento, Keyed};
use gestion_core::{Alerta, Entidad, FieldErrors};

use super::{acciones, alerta, cabecera, rechazar, cerrar_modal, error_de, listado, opciones_grupos, titulo_modal, BOTON};
use crate::api::{guardar, leer_archivo};
use crate::components::{BotonesModal, Campo, Columna, Modal, Seleccion};
use crate::config::PAGE_DOCUMENTOS;
use crate::hooks::{use_entity_page, use_grupos, EntityPage};

/* -------------------------------------------------------------------------- */
/*                                 formulaire                                  */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
struct DocumentoFormProps {
    modo: FormMode,
    registro: Option<Documento>,
    ctx: FormContext,
    enviando: bool,
    on_enviar: Callback<DocumentoEnvio>,
    on_cancelar: Callback<()>,
}

type Setter = fn(&mut DocumentoForm, String);

#[function_component(DocumentoFormulario)]
fn documento_formulario(props: &DocumentoFormProps) -> Html {
    let grupos = use_grupos();
    let form = {
        let (registro, ctx) = (props.registro.clone(), props.ctx.clone());
        use_state(move || DocumentoForm::desde(registro.as_ref(), &ctx))
    };
    let archivo = use_state(|| None::<Archivo>);
    let errores = use_state(FieldErrors::new);
    let solo_lectura = props.modo.solo_lectura();

    let on_campo = |set: Setter| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            set(&mut siguiente, valor);
            form.set(siguiente);
        })
    };

    /* le fichier est lu en mémoire dès la sélection */
    let on_archivo = {
        let archivo = archivo.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|lista| lista.get(0)) else {
                archivo.set(None);
                return;
            };
            let archivo = archivo.clone();
            spawn_local(async move {
                match leer_archivo(file).await {
                    Ok(leido) => archivo.set(Some(leido)),
                    Err(e) => error!("lecture du fichier impossible : {e:?}"),
                }
            });
        })
    };

    let onsubmit = {
        let form = form.clone();
        let archivo = archivo.clone();
        let errores = errores.clone();
        let on_enviar = props.on_enviar.clone();
        let ctx = props.ctx.clone();
        let modo = props.modo;
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if modo.solo_lectura() {
                return;
            }
            let mut completo = (*form).clone();
            completo.archivo = (*archivo).clone();
            match completo.validar(&ctx, modo) {
                Ok(envio) => {
                    errores.set(FieldErrors::new());
                    on_enviar.emit(envio);
                }
                Err(e) => errores.set(e),
            }
        })
    };

    html! {
        <form {onsubmit}>
            <Campo etiqueta="Título" valor={form.titulo.clone()} on_cambio={on_campo(|f, v| f.titulo = v)}
                requerido=true {solo_lectura} error={error_de(&errores, "titulo")} />
            <Campo etiqueta="Autores" valor={form.autores.clone()} on_cambio={on_campo(|f, v| f.autores = v)}
                {solo_lectura} />
            <Campo etiqueta="Editorial" valor={form.editorial.clone()} on_cambio={on_campo(|f, v| f.editorial = v)}
                {solo_lectura} />
            <Campo etiqueta="Año" tipo="number" valor={form.anio.clone()} on_cambio={on_campo(|f, v| f.anio = v)}
                {solo_lectura} error={error_de(&errores, "anio")} />
            if props.ctx.ve_varios_grupos() {
                <Seleccion etiqueta="Grupo" valor={form.oid_grupo.clone()} opciones={opciones_grupos(&grupos)}
                    on_cambio={on_campo(|f, v| f.oid_grupo = v)} requerido={props.modo == FormMode::Crear}
                    {solo_lectura} error={error_de(&errores, "oidGrupo")} />
            }
            if !solo_lectura {
                <div class="form-group" style="margin-bottom:0.9rem;">
                    <label style="display:block; margin-bottom:0.3rem;">
                        { if props.modo == FormMode::Crear { "Archivo *" } else { "Reemplazar archivo" } }
                    </label>
                    <input type="file" onchange={on_archivo} />
                    if let Some(a) = &*archivo {
                        <small style="display:block; color:#777;">{ format!("{} ({} bytes)", a.nombre, a.contenido.len()) }</small>
                    }
                    if let Some(e) = error_de(&errores, "archivo") {
                        <small style="color:#c62828;">{ e.to_string() }</small>
                    }
                </div>
            }
            <BotonesModal modo={props.modo} on_cancelar={props.on_cancelar.clone()} enviando={props.enviando} />
        </form>
    }
}

/* -------------------------------------------------------------------------- */
/*                                téléchargement                               */
/* -------------------------------------------------------------------------- */

fn descargar(page: &EntityPage<Documento>) -> Callback<Documento, Html> {
    let page = page.clone();
    Callback::from(move |documento: Documento| {
        let onclick = {
            let page = page.clone();
            let documento = documento.clone();
            Callback::from(move |_| {
                let (client, endpoints, estado) = (page.client.clone(), page.endpoints.clone(), page.estado.clone());
                let (id, titulo) = (documento.key(), documento.titulo.clone());
                spawn_local(async move {
                    let resultado = match CrudService::new(&client, &endpoints).descargar(id).await {
                        Ok(respuesta) => descarga_documento(respuesta, &titulo),
                        Err(e) => Err(e),
                    };
                    match resultado {
                        Ok(descarga) => {
                            info!("descarga de {}", descarga.nombre);
                            if let Err(e) = guardar(&descarga) {
                                error!("enregistrement impossible : {e:?}");
                            }
                        }
                        Err(e) => {
                            error!("documento {id} : {e}");
                            estado.dispatch(PageAction::Alertar(Alerta::desde_error(&e)));
                        }
                    }
                });
            })
        };
        html! { <button {onclick} style={BOTON}>{ "Descargar" }</button> }
    })
}

/* -------------------------------------------------------------------------- */
/*                                    page                                     */
/* -------------------------------------------------------------------------- */

#[function_component(DocumentosPage)]
pub fn documentos_page() -> Html {
    let page = use_entity_page::<Documento>(Entidad::Documentos, PAGE_DOCUMENTOS);

    let mut columnas = vec![
        Columna::texto("titulo", "Título", |d: &Documento| d.titulo.clone()),
        Columna::texto("autores", "Autores", |d: &Documento| o_guion(d.autores.as_deref())),
        Columna::texto("editorial", "Editorial", |d: &Documento| o_guion(d.editorial.as_deref())),
        Columna::texto("anio", "Año", |d: &Documento| d.anio.map_or_else(|| "-".to_string(), |a| a.to_string())),
    ];
    if page.ve_varios_grupos() {
        columnas.push(Columna::texto("grupo", "Grupo", |d: &Documento| o_guion(d.nombre_del_grupo())));
    }

    let confirmacion = if page.endpoints.removal() == Some(Removal::Eliminar) {
        "¿Seguro que querés eliminar este documento?"
    } else {
        "¿Seguro que querés quitar este documento?"
    };
    let extra = page.endpoints.descargar(0).is_some().then(|| descargar(&page));
    let acciones = acciones(&page, confirmacion.to_string(), extra);

    let modal = match &page.state().modal {
        EstadoModal::Cerrado => Html::default(),
        EstadoModal::Abierto { modo, registro } => {
            let modo = *modo;
            let on_enviar = {
                let page = page.clone();
                let id = registro.as_ref().map(Keyed::key);
                Callback::from(move |envio: DocumentoEnvio| match modo.escritura(id) {
                    Ok(Some(Escritura::Crear)) => {
                        page.escribir("Documento creado correctamente", move |client, endpoints| async move {
                            CrudService::new(&client, &endpoints)
                                .crear_multipart(envio.grupo, envio.documento, envio.archivo)
                                .await
                        })
                    }
                    Ok(Some(Escritura::Editar(id))) => {
                        page.escribir("Documento actualizado correctamente", move |client, endpoints| async move {
                            CrudService::new(&client, &endpoints)
                                .editar_multipart(id, envio.documento, envio.archivo)
                                .await
                        })
                    }
                    Ok(None) => {}
                    Err(e) => rechazar(&page, e),
                })
            };
            html! {
                <Modal titulo={titulo_modal(modo, "Documento")} on_cerrar={cerrar_modal(&page)}>
                    <DocumentoFormulario {modo} registro={registro.clone()} ctx={page.ctx()}
                        enviando={page.state().enviando} {on_enviar} on_cancelar={cerrar_modal(&page)} />
                </Modal>
            }
        }
    };

    html! {
        <div>
            { cabecera(&page, "Documentos", "Nuevo Documento") }
            { listado(&page, columnas, acciones, "No hay documentos para mostrar") }
            { modal }
            { alerta(&page) }
        </div>
    }
}
