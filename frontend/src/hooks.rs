//! État partagé des pages d'entité : chargement, filtre, pagination, modale,
//! alertes et écritures suivies d'une relecture.

use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gestion_core::crud::{CrudService, PageAction, PageState};
use gestion_core::forms::FormContext;
use gestion_core::listing::Filtrable;
use gestion_core::models::{Documento, Equipo, Grupo, Keyed, Memoria, Persona, TipoPersona};
use gestion_core::{resolve_endpoints, resolve_permissions, ApiError, Entidad, EntityEndpoints, Permisos, Usuario};

use crate::api::{anio_actual, Client, GlooBackend};
use crate::config::API_BASE;
use crate::session::{use_client, use_session};

/// Une ressource listable par une page d'entité.
#[async_trait(?Send)]
pub trait Recurso: Clone + PartialEq + Keyed + Filtrable + 'static {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError>;
}

#[async_trait(?Send)]
impl Recurso for Grupo {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError> {
        service.listar().await
    }
}

#[async_trait(?Send)]
impl Recurso for Equipo {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError> {
        service.listar().await
    }
}

#[async_trait(?Send)]
impl Recurso for Documento {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError> {
        service.listar().await
    }
}

#[async_trait(?Send)]
impl Recurso for Memoria {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError> {
        service.listar().await
    }
}

#[async_trait(?Send)]
impl Recurso for Persona {
    async fn cargar(service: &CrudService<'_, GlooBackend>) -> Result<Vec<Self>, ApiError> {
        let entidad = service.endpoints().entidad();
        let tipo = TipoPersona::from_entidad(entidad).ok_or(ApiError::MissingEndpoint {
            entidad: entidad.as_str(),
            operacion: "listar",
        })?;
        service.listar_personas(tipo).await
    }
}

async fn cargar<T: Recurso>(client: &Client, endpoints: &EntityEndpoints) -> Result<Vec<T>, ApiError> {
    T::cargar(&CrudService::new(client, endpoints)).await
}

/* -------------------------------------------------------------------------- */
/*                              réducteur Yew                                  */
/* -------------------------------------------------------------------------- */

#[derive(Clone, PartialEq)]
pub struct PageStore<T>(pub PageState<T>);

impl<T: Clone + PartialEq + 'static> Reducible for PageStore<T> {
    type Action = PageAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut siguiente = (*self).clone();
        siguiente.0.apply(action);
        Rc::new(siguiente)
    }
}

#[derive(Clone)]
pub struct EntityPage<T: Recurso> {
    pub estado: UseReducerHandle<PageStore<T>>,
    pub endpoints: Rc<EntityEndpoints>,
    pub permisos: Permisos,
    pub usuario: Usuario,
    pub client: Client,
    pub recargar: Callback<()>,
}

impl<T: Recurso> EntityPage<T> {
    pub fn state(&self) -> &PageState<T> {
        &self.estado.0
    }

    pub fn dispatch(&self, action: PageAction<T>) {
        self.estado.dispatch(action);
    }

    pub fn ctx(&self) -> FormContext {
        FormContext::new(&self.usuario, anio_actual())
    }

    /// Colonne et sélection « Grupo » : seulement pour qui voit plusieurs groupes.
    pub fn ve_varios_grupos(&self) -> bool {
        self.usuario.rol_efectivo().can_view_multiple_groups()
    }

    /// Les boutons d'écriture exigent la permission ET l'endpoint.
    pub fn puede_crear(&self) -> bool {
        self.permisos.crear && self.endpoints.puede_crear()
    }

    pub fn puede_editar(&self) -> bool {
        self.permisos.editar
    }

    pub fn puede_eliminar(&self) -> bool {
        self.permisos.eliminar && self.endpoints.removal().is_some()
    }

    /// Lance une écriture ; en cas de succès la liste est relue et la modale
    /// fermée, sinon l'erreur est affichée et la liste conservée.
    pub fn escribir<F, Fut>(&self, mensaje: &'static str, op: F)
    where
        F: FnOnce(Client, Rc<EntityEndpoints>) -> Fut + 'static,
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let estado = self.estado.clone();
        let client = self.client.clone();
        let endpoints = self.endpoints.clone();
        estado.dispatch(PageAction::Enviando);

        spawn_local(async move {
            if let Err(e) = op(client.clone(), endpoints.clone()).await {
                error!("{}: {e}", endpoints.entidad().as_str());
                estado.dispatch(PageAction::FalloEscritura(e));
                return;
            }
            info!("{}: {mensaje}", endpoints.entidad().as_str());
            match cargar::<T>(&client, &endpoints).await {
                Ok(items) => estado.dispatch(PageAction::Escrito { items, mensaje: mensaje.into() }),
                Err(e) => {
                    error!("relecture: {e}");
                    estado.dispatch(PageAction::Cerrar);
                    estado.dispatch(PageAction::FalloCarga(e.to_string()));
                }
            }
        });
    }
}

#[hook]
pub fn use_entity_page<T>(entidad: Entidad, page_size: usize) -> EntityPage<T>
where
    T: Recurso,
{
    let session = use_session();
    let usuario = (*session).clone().unwrap_or_default();
    let client = use_client();
    let endpoints = use_memo((usuario.role.clone(), entidad), |(role, entidad)| {
        resolve_endpoints(API_BASE, role, *entidad)
    });
    let permisos = resolve_permissions(&usuario.role, entidad);
    let estado = use_reducer(|| PageStore(PageState::new(page_size)));

    let recargar = {
        let estado = estado.clone();
        let client = client.clone();
        let endpoints = endpoints.clone();
        Callback::from(move |_| {
            let estado = estado.clone();
            let client = client.clone();
            let endpoints = endpoints.clone();
            estado.dispatch(PageAction::Cargar);
            spawn_local(async move {
                match cargar::<T>(&client, &endpoints).await {
                    Ok(items) => estado.dispatch(PageAction::Cargado(items)),
                    Err(e) => {
                        error!("{}: {e}", endpoints.entidad().as_str());
                        estado.dispatch(PageAction::FalloCarga(e.to_string()));
                    }
                }
            });
        })
    };

    /* chargement initial, et à chaque changement d'entité */
    {
        let recargar = recargar.clone();
        use_effect_with(entidad, move |_| {
            recargar.emit(());
            || ()
        });
    }

    EntityPage {
        estado,
        endpoints,
        permisos,
        usuario,
        client,
        recargar,
    }
}

/// Groupes proposés dans les sélections : liste complète pour
/// l'administrateur, groupe propre pour les autres rôles.
#[hook]
pub fn use_grupos() -> UseStateHandle<Vec<Grupo>> {
    let session = use_session();
    let client = use_client();
    let grupos = use_state(Vec::<Grupo>::new);
    let role = (*session).as_ref().map(|u| u.role.clone()).unwrap_or_default();

    {
        let grupos = grupos.clone();
        use_effect_with(role, move |role| {
            let endpoints = resolve_endpoints(API_BASE, role, Entidad::Grupos);
            spawn_local(async move {
                match CrudService::new(&client, &endpoints).listar::<Grupo>().await {
                    Ok(lista) => grupos.set(lista),
                    Err(e) => {
                        error!("grupos: {e}");
                        grupos.set(Vec::new());
                    }
                }
            });
            || ()
        });
    }

    grupos
}
