//! Pages de l'application et briques communes des pages d'entité.

mod documentos;
mod equipos;
mod grupos;
mod home;
mod memoria_detalle;
mod memorias;
mod personas;
mod usuarios;

pub use documentos::DocumentosPage;
pub use equipos::EquiposPage;
pub use grupos::GruposPage;
pub use home::Home;
pub use memoria_detalle::MemoriaDetallePage;
pub use memorias::MemoriasPage;
pub use personas::PersonasPage;
pub use usuarios::UsuariosPage;

use log::warn;
use serde::Serialize;
use yew::prelude::*;

use gestion_core::crud::{Carga, CrudService, PageAction};
use gestion_core::forms::{Escritura, FormMode};
use gestion_core::models::{Grupo, Keyed};
use gestion_core::role::needs_table;
use gestion_core::{ApiError, FieldErrors, Oid};

use crate::components::{AlertDialog, Columna, DataTable, Pagination, SearchBar};
use crate::hooks::{EntityPage, Recurso};

pub const BOTON: &str = "padding:0.35rem 0.7rem; margin-right:0.3rem; border:1px solid #ccc; border-radius:4px; background:#fff; cursor:pointer;";
pub const BOTON_PELIGRO: &str = "padding:0.35rem 0.7rem; margin-right:0.3rem; border:1px solid #c62828; border-radius:4px; background:#fff; color:#c62828; cursor:pointer;";
pub const BOTON_PRIMARIO: &str = "padding:0.5rem 1rem; border:none; border-radius:4px; background:#3f51b5; color:#fff; cursor:pointer;";

/* -------------------------------------------------------------------------- */
/*                          en-tête : titre, recherche                         */
/* -------------------------------------------------------------------------- */

pub fn cabecera<T: Recurso>(page: &EntityPage<T>, titulo: &str, nuevo: &str) -> Html {
    let on_filtro = {
        let estado = page.estado.clone();
        Callback::from(move |texto: String| estado.dispatch(PageAction::Filtrar(texto)))
    };
    let on_nuevo = {
        let estado = page.estado.clone();
        Callback::from(move |_| {
            estado.dispatch(PageAction::Abrir { modo: FormMode::Crear, registro: None })
        })
    };

    html! {
        <div style="display:flex; align-items:center; justify-content:space-between; gap:1rem; margin-bottom:1rem;">
            <h1 style="margin:0;">{ titulo }</h1>
            <div style="display:flex; gap:0.75rem; align-items:center;">
                if page.permisos.buscar {
                    <SearchBar valor={page.state().lista.filtro.clone()} on_cambio={on_filtro} />
                }
                if page.puede_crear() {
                    <button onclick={on_nuevo} style={BOTON_PRIMARIO}>{ format!("+ {nuevo}") }</button>
                }
            </div>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                 corps : chargement, échec, tableau paginé                   */
/* -------------------------------------------------------------------------- */

pub fn listado<T: Recurso>(
    page: &EntityPage<T>,
    columnas: Vec<Columna<T>>,
    acciones: Callback<T, Html>,
    vacio: &str,
) -> Html {
    if !needs_table(&page.usuario.role) {
        return html! { <p>{ "Tu rol no tiene acceso a este listado." }</p> };
    }
    let estado = page.state();
    match &estado.carga {
        Carga::Cargando => html! { <p>{ "Cargando..." }</p> },
        Carga::Fallo(mensaje) => {
            let reintentar = {
                let recargar = page.recargar.clone();
                Callback::from(move |_| recargar.emit(()))
            };
            html! {
                <div style="padding:1rem; border:1px solid #f5c6cb; background:#fdecea; border-radius:6px;">
                    <p style="margin-top:0;">{ format!("Error: {mensaje}") }</p>
                    <button onclick={reintentar} style={BOTON}>{ "Reintentar" }</button>
                </div>
            }
        }
        Carga::Lista => {
            let vista = estado.vista();
            let on_pagina = {
                let estado = page.estado.clone();
                Callback::from(move |n: usize| estado.dispatch(PageAction::Pagina(n)))
            };
            html! {
                <>
                    <DataTable<T>
                        {columnas}
                        filas={vista.filas}
                        acciones={Some(acciones)}
                        vacio={AttrValue::from(vacio.to_string())}
                    />
                    if page.permisos.paginar || vista.total_pages > 1 {
                        <Pagination pagina={vista.pagina} total_pages={vista.total_pages} on_cambio={on_pagina} />
                    }
                </>
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                       actions de ligne : ver / editar / eliminar            */
/* -------------------------------------------------------------------------- */

/// `confirmacion` est posée avant toute suppression ; `extra` ajoute des
/// boutons propres à la page (téléchargement, export…).
pub fn acciones<T: Recurso>(
    page: &EntityPage<T>,
    confirmacion: String,
    extra: Option<Callback<T, Html>>,
) -> Callback<T, Html> {
    let page = page.clone();
    Callback::from(move |fila: T| {
        let abrir = |modo: FormMode| {
            let estado = page.estado.clone();
            let fila = fila.clone();
            Callback::from(move |_| {
                estado.dispatch(PageAction::Abrir { modo, registro: Some(fila.clone()) })
            })
        };
        let eliminar = {
            let page = page.clone();
            let confirmacion = confirmacion.clone();
            let id = fila.key();
            Callback::from(move |_| {
                if !gloo_dialogs::confirm(&confirmacion) {
                    return;
                }
                page.escribir("Eliminado correctamente", move |client, endpoints| async move {
                    CrudService::new(&client, &endpoints).eliminar(id).await
                });
            })
        };

        html! {
            <div style="white-space:nowrap;">
                <button onclick={abrir(FormMode::Ver)} style={BOTON}>{ "Ver" }</button>
                if page.puede_editar() {
                    <button onclick={abrir(FormMode::Editar)} style={BOTON}>{ "Editar" }</button>
                }
                if page.puede_eliminar() {
                    <button onclick={eliminar} style={BOTON_PELIGRO}>{ "Eliminar" }</button>
                }
                if let Some(extra) = &extra {
                    { extra.emit(fila.clone()) }
                }
            </div>
        }
    })
}

/* -------------------------------------------------------------------------- */
/*                         écriture JSON : crear / editar                      */
/* -------------------------------------------------------------------------- */

/// Envoie la charge utile validée selon le mode de la modale.
pub fn guardar<T, P>(page: &EntityPage<T>, modo: FormMode, id: Option<Oid>, grupo: Option<Oid>, payload: P)
where
    T: Recurso,
    P: Serialize + 'static,
{
    match modo.escritura(id) {
        Ok(Some(Escritura::Crear)) => page.escribir("Registro creado correctamente", move |client, endpoints| async move {
            CrudService::new(&client, &endpoints).crear(grupo, &payload).await
        }),
        Ok(Some(Escritura::Editar(id))) => {
            page.escribir("Registro actualizado correctamente", move |client, endpoints| async move {
                CrudService::new(&client, &endpoints).editar(id, &payload).await
            })
        }
        Ok(None) => {}
        Err(e) => rechazar(page, e),
    }
}

/// Envoi impossible avant tout appel réseau : trace et alerte.
pub fn rechazar<T: Recurso>(page: &EntityPage<T>, err: ApiError) {
    warn!("{}: envío rechazado : {err}", page.endpoints.entidad().as_str());
    page.dispatch(PageAction::FalloEscritura(err));
}

/* -------------------------------------------------------------------------- */
/*                              modale et alerte                               */
/* -------------------------------------------------------------------------- */

pub fn titulo_modal(modo: FormMode, singular: &str) -> String {
    match modo {
        FormMode::Ver => format!("Ver {singular}"),
        FormMode::Crear => format!("Nuevo {singular}"),
        FormMode::Editar => format!("Editar {singular}"),
    }
}

pub fn cerrar_modal<T: Recurso>(page: &EntityPage<T>) -> Callback<()> {
    let estado = page.estado.clone();
    Callback::from(move |_| estado.dispatch(PageAction::Cerrar))
}

pub fn alerta<T: Recurso>(page: &EntityPage<T>) -> Html {
    let estado = page.estado.clone();
    let on_cerrar = Callback::from(move |_| estado.dispatch(PageAction::CerrarAlerta));
    html! { <AlertDialog alerta={page.state().alerta.clone()} {on_cerrar} /> }
}

/* -------------------------------------------------------------------------- */
/*                          petits utilitaires de formulaire                   */
/* -------------------------------------------------------------------------- */

pub fn error_de(errores: &FieldErrors, campo: &str) -> Option<AttrValue> {
    errores.get(campo).map(|e| AttrValue::from(e.to_string()))
}

/// Valeur d'origine affichée sous un champ modifié en édition.
pub fn original_si(modificado: bool, valor: &str) -> Option<AttrValue> {
    modificado.then(|| AttrValue::from(if valor.is_empty() { "-".to_string() } else { valor.to_string() }))
}

pub fn opciones_grupos(grupos: &[Grupo]) -> Vec<(String, String)> {
    grupos
        .iter()
        .map(|g| (g.oid_grupo.to_string(), g.referencia().etiqueta()))
        .collect()
}
