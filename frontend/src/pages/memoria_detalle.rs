//! Détail d'une mémoire : en-tête, trois onglets de collections rattachées et,
//! en mode gestion, ajout/retrait par jointure.

use std::rc::Rc;

use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use gestion_core::memoria::{available_minus_attached, MemoriaService, ModoDetalle};
use gestion_core::models::{o_guion, Documento, Equipo, Keyed, Memoria, PersonaResumen, TipoPersona};
use gestion_core::{
    resolve_endpoints, resolve_permissions, Alerta, ApiError, Coleccion, Entidad, EntityEndpoints, Oid,
};

use super::{BOTON, BOTON_PELIGRO, BOTON_PRIMARIO};
use crate::api::{Client, GlooBackend};
use crate::components::{AlertDialog, Columna, DataTable, Seleccion};
use crate::config::API_BASE;
use crate::session::{use_client, use_session};
use crate::Route;

/* -------------------------------------------------------------------------- */
/*                                  états                                      */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
enum Cabecera {
    Cargando,
    Fallo(String),
    NoEncontrada,
    Lista(Memoria),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Colecciones {
    personas: Vec<PersonaResumen>,
    equipos: Vec<Equipo>,
    documentos: Vec<Documento>,
}

enum Lote {
    Personas(Vec<PersonaResumen>),
    Equipos(Vec<Equipo>),
    Documentos(Vec<Documento>),
}

impl Reducible for Colecciones {
    type Action = Lote;

    fn reduce(self: Rc<Self>, lote: Lote) -> Rc<Self> {
        let mut siguiente = (*self).clone();
        match lote {
            Lote::Personas(v) => siguiente.personas = v,
            Lote::Equipos(v) => siguiente.equipos = v,
            Lote::Documentos(v) => siguiente.documentos = v,
        }
        Rc::new(siguiente)
    }
}

impl Colecciones {
    fn cantidad(&self, coleccion: Coleccion) -> usize {
        match coleccion {
            Coleccion::Personas => self.personas.len(),
            Coleccion::Equipos => self.equipos.len(),
            Coleccion::Documentos => self.documentos.len(),
        }
    }
}

fn singular(coleccion: Coleccion) -> &'static str {
    match coleccion {
        Coleccion::Personas => "persona",
        Coleccion::Equipos => "equipo",
        Coleccion::Documentos => "documento",
    }
}

fn titulo_pestana(coleccion: Coleccion) -> &'static str {
    match coleccion {
        Coleccion::Personas => "Personas",
        Coleccion::Equipos => "Equipos",
        Coleccion::Documentos => "Documentos",
    }
}

async fn leer(service: &MemoriaService<'_, GlooBackend>, coleccion: Coleccion, id: Oid) -> Result<Lote, ApiError> {
    Ok(match coleccion {
        Coleccion::Personas => Lote::Personas(service.adjuntos(coleccion, id).await?),
        Coleccion::Equipos => Lote::Equipos(service.adjuntos(coleccion, id).await?),
        Coleccion::Documentos => Lote::Documentos(service.adjuntos(coleccion, id).await?),
    })
}

/* -------------------------------------------------------------------------- */
/*                      opérations sur les collections                         */
/* -------------------------------------------------------------------------- */

#[derive(Clone)]
struct Detalle {
    client: Client,
    endpoints: Rc<EntityEndpoints>,
    id: Oid,
    adjuntos: UseReducerDispatcher<Colecciones>,
    alerta: UseStateHandle<Option<Alerta>>,
}

impl Detalle {
    /// Seule la collection touchée est relue.
    fn releer(&self, coleccion: Coleccion) {
        let detalle = self.clone();
        spawn_local(async move {
            let service = MemoriaService::new(&detalle.client, &detalle.endpoints, API_BASE);
            match leer(&service, coleccion, detalle.id).await {
                Ok(lote) => detalle.adjuntos.dispatch(lote),
                Err(e) => {
                    error!("memoria {} / {} : {e}", detalle.id, coleccion.label());
                    detalle.alerta.set(Some(Alerta::desde_error(&e)));
                }
            }
        });
    }

    fn agregar(&self, coleccion: Coleccion, item: Oid) {
        let detalle = self.clone();
        spawn_local(async move {
            let service = MemoriaService::new(&detalle.client, &detalle.endpoints, API_BASE);
            match service.agregar(coleccion, detalle.id, item).await {
                Ok(()) => {
                    info!("memoria {} : {} {item} agregado", detalle.id, singular(coleccion));
                    detalle.releer(coleccion);
                }
                Err(e) => {
                    error!("memoria {} : {e}", detalle.id);
                    detalle.alerta.set(Some(Alerta::desde_error(&e)));
                }
            }
        });
    }

    fn quitar(&self, coleccion: Coleccion, item: Oid) {
        if !gloo_dialogs::confirm(&format!("¿Quitar {}?", singular(coleccion))) {
            return;
        }
        let detalle = self.clone();
        spawn_local(async move {
            let service = MemoriaService::new(&detalle.client, &detalle.endpoints, API_BASE);
            match service.quitar(coleccion, detalle.id, item).await {
                Ok(()) => {
                    info!("memoria {} : {} {item} quitado", detalle.id, singular(coleccion));
                    detalle.releer(coleccion);
                }
                Err(e) => {
                    error!("memoria {} : {e}", detalle.id);
                    detalle.alerta.set(Some(Alerta::desde_error(&e)));
                }
            }
        });
    }
}

/* -------------------------------------------------------------------------- */
/*                                  rendu                                      */
/* -------------------------------------------------------------------------- */

fn boton_quitar(detalle: &Detalle, coleccion: Coleccion) -> Callback<Oid, Html> {
    let detalle = detalle.clone();
    Callback::from(move |item: Oid| {
        let detalle = detalle.clone();
        let onclick = Callback::from(move |_| detalle.quitar(coleccion, item));
        html! { <button {onclick} style={BOTON_PELIGRO}>{ "Quitar" }</button> }
    })
}

fn tabla<T>(filas: Vec<T>, columnas: Vec<Columna<T>>, quitar: Option<Callback<Oid, Html>>, vacio: &str) -> Html
where
    T: Keyed + Clone + PartialEq + 'static,
{
    let acciones = quitar.map(|q| Callback::from(move |fila: T| q.emit(fila.key())));
    html! { <DataTable<T> {columnas} {filas} {acciones} vacio={AttrValue::from(vacio.to_string())} /> }
}

fn columnas_personas() -> Vec<Columna<PersonaResumen>> {
    vec![
        Columna::texto("nombre", "Nombre", |p: &PersonaResumen| p.nombre.clone()),
        Columna::texto("apellido", "Apellido", |p: &PersonaResumen| p.apellido.clone()),
        Columna::texto("tipoPersona", "Tipo", |p: &PersonaResumen| {
            p.tipo_persona
                .as_deref()
                .and_then(TipoPersona::parse)
                .map_or_else(|| o_guion(p.tipo_persona.as_deref()), |t| t.singular().to_string())
        }),
    ]
}

fn columnas_equipos() -> Vec<Columna<Equipo>> {
    vec![
        Columna::texto("denominacion", "Denominación", |e: &Equipo| e.denominacion.clone()),
        Columna::texto("fechaIncorporacion", "Incorporación", |e: &Equipo| {
            o_guion(e.fecha_incorporacion.as_deref())
        }),
        Columna::texto("montoInvertido", "Monto", |e: &Equipo| {
            e.monto_invertido.map_or_else(|| "-".to_string(), |m| format!("$ {m:.2}"))
        }),
    ]
}

fn columnas_documentos() -> Vec<Columna<Documento>> {
    vec![
        Columna::texto("titulo", "Título", |d: &Documento| d.titulo.clone()),
        Columna::texto("autores", "Autores", |d: &Documento| o_guion(d.autores.as_deref())),
        Columna::texto("anio", "Año", |d: &Documento| d.anio.map_or_else(|| "-".to_string(), |a| a.to_string())),
    ]
}

/// Candidats à l'ajout : disponibles moins déjà rattachés.
fn candidatos(coleccion: Coleccion, disponibles: &Colecciones, adjuntos: &Colecciones) -> Vec<(String, String)> {
    match coleccion {
        Coleccion::Personas => available_minus_attached(&disponibles.personas, &adjuntos.personas)
            .into_iter()
            .map(|p| {
                let tipo = p.tipo_persona.as_deref().and_then(TipoPersona::parse).map_or("", |t| t.singular());
                (p.key().to_string(), format!("{} {} ({tipo})", p.nombre, p.apellido))
            })
            .collect(),
        Coleccion::Equipos => available_minus_attached(&disponibles.equipos, &adjuntos.equipos)
            .into_iter()
            .map(|e| (e.key().to_string(), e.denominacion))
            .collect(),
        Coleccion::Documentos => available_minus_attached(&disponibles.documentos, &adjuntos.documentos)
            .into_iter()
            .map(|d| (d.key().to_string(), d.titulo))
            .collect(),
    }
}

/* -------------------------------------------------------------------------- */
/*                                    page                                     */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct MemoriaDetalleProps {
    pub id: Oid,
}

#[function_component(MemoriaDetallePage)]
pub fn memoria_detalle_page(props: &MemoriaDetalleProps) -> Html {
    let id = props.id;
    let session = use_session();
    let client = use_client();
    let location = use_location();
    let navigator = use_navigator();

    let role = (*session).as_ref().map(|u| u.role.clone()).unwrap_or_default();
    let endpoints = use_memo(role.clone(), |role| resolve_endpoints(API_BASE, role, Entidad::Memorias));
    let permisos = resolve_permissions(&role, Entidad::Memorias);
    let modo = location.map_or(ModoDetalle::Ver, |l| ModoDetalle::desde_query(l.query_str()));
    let editable = modo.editable() && permisos.editar;

    let cabecera = use_state(|| Cabecera::Cargando);
    let adjuntos = use_reducer(Colecciones::default);
    let disponibles = use_reducer(Colecciones::default);
    let pestana = use_state(|| Coleccion::Personas);
    let seleccion = use_state(String::new);
    let alerta = use_state(|| None::<Alerta>);

    let detalle = Detalle {
        client: client.clone(),
        endpoints: endpoints.clone(),
        id,
        adjuntos: adjuntos.dispatcher(),
        alerta: alerta.clone(),
    };

    /* chargement : en-tête, collections, puis candidats en gestion */
    let cargar = {
        let (detalle, cabecera, disponibles) = (detalle.clone(), cabecera.clone(), disponibles.dispatcher());
        Callback::from(move |_| {
            cabecera.set(Cabecera::Cargando);
            {
                let (detalle, cabecera) = (detalle.clone(), cabecera.clone());
                spawn_local(async move {
                    let service = MemoriaService::new(&detalle.client, &detalle.endpoints, API_BASE);
                    cabecera.set(match service.obtener(detalle.id).await {
                        Ok(memoria) => Cabecera::Lista(memoria),
                        Err(e) if e.status() == Some(404) => Cabecera::NoEncontrada,
                        Err(e) => {
                            error!("memoria {} : {e}", detalle.id);
                            Cabecera::Fallo(e.to_string())
                        }
                    });
                });
            }
            for coleccion in Coleccion::ALL {
                detalle.releer(coleccion);
            }
            if editable {
                let (detalle, disponibles) = (detalle.clone(), disponibles.clone());
                spawn_local(async move {
                    let service = MemoriaService::new(&detalle.client, &detalle.endpoints, API_BASE);
                    disponibles.dispatch(Lote::Personas(service.personas_disponibles().await));
                    disponibles.dispatch(Lote::Equipos(service.equipos_disponibles().await));
                    disponibles.dispatch(Lote::Documentos(service.documentos_disponibles().await));
                });
            }
        })
    };

    {
        let cargar = cargar.clone();
        use_effect_with((id, editable), move |_| {
            cargar.emit(());
            || ()
        });
    }

    let volver = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if let Some(nav) = &navigator {
                nav.push(&Route::Memorias);
            }
        })
    };
    let cerrar_alerta = {
        let alerta = alerta.clone();
        Callback::from(move |_| alerta.set(None))
    };

    let memoria = match &*cabecera {
        Cabecera::Cargando => return html! { <p>{ "Cargando memoria..." }</p> },
        Cabecera::NoEncontrada => {
            return html! {
                <div>
                    <p>{ "Memoria no encontrada" }</p>
                    <button onclick={volver} style={BOTON}>{ "Volver" }</button>
                </div>
            }
        }
        Cabecera::Fallo(mensaje) => {
            let reintentar = Callback::from(move |_| cargar.emit(()));
            return html! {
                <div style="padding:1rem; border:1px solid #f5c6cb; background:#fdecea; border-radius:6px;">
                    <p style="margin-top:0;">{ format!("Error: {mensaje}") }</p>
                    <button onclick={reintentar} style={BOTON}>{ "Reintentar" }</button>
                    <button onclick={volver} style={BOTON}>{ "Volver" }</button>
                </div>
            };
        }
        Cabecera::Lista(memoria) => memoria.clone(),
    };

    let actual = *pestana;
    let pestanas = Coleccion::ALL.into_iter().map(|coleccion| {
        let onclick = {
            let (pestana, seleccion) = (pestana.clone(), seleccion.clone());
            Callback::from(move |_| {
                pestana.set(coleccion);
                seleccion.set(String::new());
            })
        };
        let estilo = if coleccion == actual {
            "padding:0.5rem 1rem; border:none; border-bottom:3px solid #3f51b5; background:none; font-weight:bold; cursor:pointer;"
        } else {
            "padding:0.5rem 1rem; border:none; border-bottom:3px solid transparent; background:none; cursor:pointer;"
        };
        html! {
            <button key={coleccion.label()} {onclick} style={estilo}>
                { format!("{} ({})", titulo_pestana(coleccion), adjuntos.cantidad(coleccion)) }
            </button>
        }
    });

    let quitar = editable.then(|| boton_quitar(&detalle, actual));
    let contenido = match actual {
        Coleccion::Personas => tabla(adjuntos.personas.clone(), columnas_personas(), quitar, "Sin personas asociadas"),
        Coleccion::Equipos => tabla(adjuntos.equipos.clone(), columnas_equipos(), quitar, "Sin equipos asociados"),
        Coleccion::Documentos => {
            tabla(adjuntos.documentos.clone(), columnas_documentos(), quitar, "Sin documentos asociados")
        }
    };

    let agregar = if editable {
        let on_seleccion = {
            let seleccion = seleccion.clone();
            Callback::from(move |valor: String| seleccion.set(valor))
        };
        let onclick = {
            let (detalle, seleccion) = (detalle.clone(), seleccion.clone());
            Callback::from(move |_| {
                if let Ok(item) = seleccion.trim().parse::<Oid>() {
                    detalle.agregar(actual, item);
                    seleccion.set(String::new());
                }
            })
        };
        html! {
            <div style="display:flex; gap:0.75rem; align-items:flex-end; margin:1rem 0;">
                <div style="flex:1;">
                    <Seleccion etiqueta={format!("Agregar {}", singular(actual))} valor={(*seleccion).clone()}
                        opciones={candidatos(actual, &disponibles, &adjuntos)} on_cambio={on_seleccion} />
                </div>
                <button {onclick} disabled={seleccion.is_empty()} style={BOTON_PRIMARIO}>{ "Agregar" }</button>
            </div>
        }
    } else {
        Html::default()
    };

    let grupo = memoria.grupo.as_ref().map_or_else(|| "-".to_string(), |g| g.etiqueta());
    let anio = memoria.anio.map_or_else(|| "-".to_string(), |a| a.to_string());

    html! {
        <div>
            <div style="display:flex; align-items:center; justify-content:space-between; margin-bottom:1rem;">
                <h1 style="margin:0;">{ format!("Memoria {anio}") }</h1>
                <button onclick={volver} style={BOTON}>{ "Volver" }</button>
            </div>
            <p><strong>{ "Grupo: " }</strong>{ grupo }</p>
            if editable {
                <p style="color:#3f51b5;">{ "Modo gestión" }</p>
            }
            <nav style="display:flex; gap:0.25rem; border-bottom:1px solid #ddd; margin-bottom:1rem;">
                { for pestanas }
            </nav>
            { agregar }
            { contenido }
            <AlertDialog alerta={(*alerta).clone()} on_cerrar={cerrar_alerta} />
        </div>
    }
}
