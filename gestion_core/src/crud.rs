//! Opérations CRUD génériques d'une page d'entité et sa machine d'états.
//!
//! Les écritures ne renvoient rien : l'appelant relit la liste complète après
//! succès, un échec laisse la liste affichée intacte.

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::alerta::Alerta;
use crate::endpoints::{resolve_endpoints, EntityEndpoints};
use crate::error::ApiError;
use crate::forms::FormMode;
use crate::http::{ApiClient, ApiRequest, ApiResponse, Archivo, HttpBackend, HttpMethod};
use crate::listing::{Filtrable, ListState, Vista};
use crate::models::{Persona, PersonaWire, TipoPersona};
use crate::Oid;

pub struct CrudService<'a, B> {
    client: &'a ApiClient<B>,
    endpoints: &'a EntityEndpoints,
}

impl<'a, B: HttpBackend> CrudService<'a, B> {
    pub fn new(client: &'a ApiClient<B>, endpoints: &'a EntityEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &EntityEndpoints {
        self.endpoints
    }

    /// Liste complète, ou la vue propre au rôle (objet seul accepté).
    pub async fn listar<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        let url = self
            .endpoints
            .listar_o_ver()
            .ok_or_else(|| self.endpoints.missing("listar"))?;
        debug!("relecture {}", self.endpoints.entidad().as_str());
        self.client.get_one_or_many(&url).await
    }

    pub async fn listar_personas(&self, tipo: TipoPersona) -> Result<Vec<Persona>, ApiError> {
        let wires: Vec<PersonaWire> = self.listar().await?;
        Ok(wires.into_iter().map(|w| Persona::from_wire(w, tipo)).collect())
    }

    pub async fn obtener<T: DeserializeOwned>(&self, id: Oid) -> Result<T, ApiError> {
        let url = self
            .endpoints
            .obtener(id)
            .ok_or_else(|| self.endpoints.missing("obtener"))?;
        self.client.get_json(&url).await
    }

    pub async fn crear<P>(&self, grupo: Option<Oid>, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoints.crear(grupo)?;
        self.client.send_json(HttpMethod::Post, &url, payload).await.map(drop)
    }

    pub async fn editar<P>(&self, id: Oid, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        let url = self
            .endpoints
            .actualizar(id)
            .ok_or_else(|| self.endpoints.missing("editar"))?;
        self.client.send_json(HttpMethod::Put, &url, payload).await.map(drop)
    }

    /// Documents : partie JSON `documento` + fichier `archivo`.
    pub async fn crear_multipart(
        &self,
        grupo: Option<Oid>,
        documento: Value,
        archivo: Option<Archivo>,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.crear(grupo)?;
        self.client
            .execute(ApiRequest::post(url).multipart(documento, archivo))
            .await
            .map(drop)
    }

    pub async fn editar_multipart(
        &self,
        id: Oid,
        documento: Value,
        archivo: Option<Archivo>,
    ) -> Result<(), ApiError> {
        let url = self
            .endpoints
            .actualizar(id)
            .ok_or_else(|| self.endpoints.missing("editar"))?;
        self.client
            .execute(ApiRequest::put(url).multipart(documento, archivo))
            .await
            .map(drop)
    }

    /// Suppression ou désactivation selon la politique du rôle.
    pub async fn eliminar(&self, id: Oid) -> Result<(), ApiError> {
        let remover = self
            .endpoints
            .delete_or_deactivate()
            .ok_or_else(|| self.endpoints.missing("eliminar"))?;
        self.client.execute(remover(id)).await.map(drop)
    }

    pub async fn descargar(&self, id: Oid) -> Result<ApiResponse, ApiError> {
        let url = self
            .endpoints
            .descargar(id)
            .ok_or_else(|| self.endpoints.missing("descargar"))?;
        self.client.execute(ApiRequest::get(url)).await
    }
}

/// Les quatre variantes de personnes visibles pour le rôle. Une liste en
/// échec compte pour vide.
pub async fn todas_las_personas<B: HttpBackend>(
    client: &ApiClient<B>,
    base: &str,
    role: &str,
) -> Vec<Persona> {
    let mut todas = Vec::new();
    for tipo in TipoPersona::ALL {
        let endpoints = resolve_endpoints(base, role, tipo.entidad());
        match CrudService::new(client, &endpoints).listar_personas(tipo).await {
            Ok(personas) => todas.extend(personas),
            Err(e) => warn!("{} non disponibles : {e}", tipo.plural()),
        }
    }
    todas
}

/* -------------------------------------------------------------------------- */
/*                          état d'une page d'entité                           */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum Carga {
    Cargando,
    Lista,
    Fallo(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal<T> {
    Cerrado,
    Abierto { modo: FormMode, registro: Option<T> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState<T> {
    pub items: Vec<T>,
    pub carga: Carga,
    pub modal: Modal<T>,
    pub lista: ListState,
    pub alerta: Option<Alerta>,
    pub enviando: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageAction<T> {
    Cargar,
    Cargado(Vec<T>),
    FalloCarga(String),
    Filtrar(String),
    Pagina(usize),
    Abrir { modo: FormMode, registro: Option<T> },
    Cerrar,
    Enviando,
    /// Écriture acceptée : la liste relue remplace l'ancienne.
    Escrito { items: Vec<T>, mensaje: String },
    FalloEscritura(ApiError),
    Alertar(Alerta),
    CerrarAlerta,
}

impl<T: Clone> PageState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            carga: Carga::Cargando,
            modal: Modal::Cerrado,
            lista: ListState::new(page_size),
            alerta: None,
            enviando: false,
        }
    }

    pub fn apply(&mut self, action: PageAction<T>) {
        match action {
            PageAction::Cargar => self.carga = Carga::Cargando,
            PageAction::Cargado(items) => {
                self.lista.acotar(items.len());
                self.items = items;
                self.carga = Carga::Lista;
            }
            PageAction::FalloCarga(mensaje) => self.carga = Carga::Fallo(mensaje),
            PageAction::Filtrar(filtro) => self.lista.set_filtro(filtro),
            PageAction::Pagina(pagina) => self.lista.set_pagina(pagina),
            PageAction::Abrir { modo, registro } => self.modal = Modal::Abierto { modo, registro },
            PageAction::Cerrar => self.modal = Modal::Cerrado,
            PageAction::Enviando => self.enviando = true,
            PageAction::Escrito { items, mensaje } => {
                self.lista.acotar(items.len());
                self.items = items;
                self.carga = Carga::Lista;
                self.modal = Modal::Cerrado;
                self.enviando = false;
                self.alerta = Some(Alerta::exito(mensaje));
            }
            PageAction::FalloEscritura(err) => {
                self.enviando = false;
                self.alerta = Some(Alerta::desde_error(&err));
            }
            PageAction::Alertar(alerta) => self.alerta = Some(alerta),
            PageAction::CerrarAlerta => self.alerta = None,
        }
    }

    pub fn vista(&self) -> Vista<T>
    where
        T: Filtrable,
    {
        self.lista.vista(&self.items)
    }

    pub fn modo(&self) -> Option<FormMode> {
        match &self.modal {
            Modal::Abierto { modo, .. } => Some(*modo),
            Modal::Cerrado => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::endpoints::resolve_endpoints;
    use crate::forms::{EquipoForm, FormContext};
    use crate::http::RequestBody;
    use crate::models::Equipo;
    use crate::permissions::Entidad;
    use crate::role::Role;
    use crate::test_utils::MemoryBackend;

    const BASE: &str = "http://api";

    /// Backend à état : POST ajoute, GET relit.
    fn backend_equipos() -> (MemoryBackend, Rc<RefCell<Vec<Value>>>) {
        let stock = Rc::new(RefCell::new(vec![json!({"oidEquipo": 1, "denominacion": "Osciloscopio"})]));
        let backend = MemoryBackend::new();
        let data = stock.clone();
        backend.handler(move |req| {
            if req.url.ends_with("equipos/listarEquipos") {
                return Some(ApiResponse::new(200, Value::Array(data.borrow().clone()).to_string()));
            }
            if req.url.contains("agregarEquipo") {
                if let RequestBody::Json(body) = &req.body {
                    let mut nuevo = body.clone();
                    let oid = data.borrow().len() as i64 + 1;
                    nuevo["oidEquipo"] = json!(oid);
                    data.borrow_mut().push(nuevo);
                }
                return Some(ApiResponse::new(200, ""));
            }
            None
        });
        (backend, stock)
    }

    #[test]
    fn created_entity_appears_exactly_once() {
        let (backend, _) = backend_equipos();
        let client = ApiClient::new(&backend, Some("tok".into()));
        let endpoints = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Equipos);
        let service = CrudService::new(&client, &endpoints);

        let ctx = FormContext { role: Role::Administrador, grupo_usuario: None, anio_actual: 2025 };
        let form = EquipoForm {
            denominacion: "Impresora 3D".into(),
            oid_grupo: "2".into(),
            monto_invertido: "1500".into(),
            ..Default::default()
        };
        let payload = form.validar(&ctx, FormMode::Crear).unwrap();

        block_on(service.crear(payload.grupo, &payload)).unwrap();
        let lista: Vec<Equipo> = block_on(service.listar()).unwrap();
        let coincidencias = lista.iter().filter(|e| e.denominacion == "Impresora 3D").count();
        assert_eq!(coincidencias, 1);
        assert_eq!(lista.len(), 2);
        let requests = backend.requests();
        let alta = &requests[0];
        assert!(alta.url.ends_with("agregarEquipo/2"));
        assert!(matches!(&alta.body, RequestBody::Json(body) if body.get("oidGrupo").is_none()));
    }

    #[test]
    fn removal_follows_role_policy() {
        let backend = MemoryBackend::new();
        backend.handler(|req| {
            (req.method != HttpMethod::Get).then(|| ApiResponse::new(200, ""))
        });
        let client = ApiClient::new(&backend, None);

        for role in ["ADMINISTRADOR", "DIRECTOR"] {
            let endpoints = resolve_endpoints(BASE, role, Entidad::Equipos);
            let service = CrudService::new(&client, &endpoints);
            block_on(service.eliminar(7)).unwrap();
        }

        let escrituras: Vec<_> = backend
            .requests()
            .into_iter()
            .filter(|r| r.method != HttpMethod::Get)
            .collect();
        assert_eq!(escrituras[0].method, HttpMethod::Delete);
        assert_eq!(escrituras[0].url, "http://api/administrador/equipos/eliminarEquipo/7");
        assert_eq!(escrituras[1].method, HttpMethod::Put);
        assert_eq!(escrituras[1].url, "http://api/director/equipos/quitarEquipo/7");
    }

    #[test]
    fn integrante_cannot_remove() {
        let backend = MemoryBackend::new();
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "INTEGRANTE", Entidad::Becarios);
        let service = CrudService::new(&client, &endpoints);

        let err = block_on(service.eliminar(7)).unwrap_err();
        assert!(matches!(err, ApiError::MissingEndpoint { operacion: "eliminar", .. }));
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn admin_without_group_sends_nothing() {
        let backend = MemoryBackend::new();
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Becarios);
        let service = CrudService::new(&client, &endpoints);

        let err = block_on(service.crear(None, &json!({"nombre": "Ana"}))).unwrap_err();
        assert_eq!(err, ApiError::MissingGroup);
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn failed_write_keeps_current_list() {
        let mut state: PageState<i64> = PageState::new(6);
        state.apply(PageAction::Cargado(vec![1, 2, 3]));
        state.apply(PageAction::Abrir { modo: FormMode::Crear, registro: None });
        state.apply(PageAction::Enviando);
        state.apply(PageAction::FalloEscritura(ApiError::Http {
            status: 400,
            message: "Sigla duplicada".into(),
        }));

        assert_eq!(state.items, vec![1, 2, 3]);
        assert_eq!(state.modo(), Some(FormMode::Crear));
        assert!(!state.enviando);
        assert_eq!(state.alerta.unwrap().mensaje, "Sigla duplicada");
    }

    #[test]
    fn successful_write_closes_modal_and_replaces_list() {
        let mut state: PageState<i64> = PageState::new(6);
        state.apply(PageAction::Cargado(vec![1]));
        state.apply(PageAction::Abrir { modo: FormMode::Editar, registro: Some(1) });
        state.apply(PageAction::Escrito { items: vec![1, 2], mensaje: "Guardado".into() });

        assert_eq!(state.modal, Modal::Cerrado);
        assert_eq!(state.items, vec![1, 2]);
        assert_eq!(state.carga, Carga::Lista);
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Fila(i64);

    impl crate::listing::Filtrable for Fila {
        fn campos_busqueda(&self) -> Vec<String> {
            vec![self.0.to_string()]
        }
    }

    fn filas(n: i64) -> Vec<Fila> {
        (1..=n).map(Fila).collect()
    }

    #[test]
    fn removing_last_row_of_last_page_moves_back_a_page() {
        let mut state: PageState<Fila> = PageState::new(6);
        state.apply(PageAction::Cargado(filas(7)));
        state.apply(PageAction::Pagina(2));
        assert_eq!(state.vista().filas, vec![Fila(7)]);

        state.apply(PageAction::Escrito { items: filas(6), mensaje: "Eliminado correctamente".into() });

        let vista = state.vista();
        assert_eq!(state.lista.pagina, 1);
        assert_eq!(vista.pagina, 1);
        assert_eq!(vista.total_pages, 1);
        assert_eq!(vista.filas.len(), 6);
    }

    #[test]
    fn shorter_reload_keeps_page_in_range() {
        let mut state: PageState<Fila> = PageState::new(2);
        state.apply(PageAction::Cargado(filas(9)));
        state.apply(PageAction::Pagina(5));
        state.apply(PageAction::Cargado(filas(4)));

        assert_eq!(state.lista.pagina, 2);
        assert_eq!(state.vista().filas, vec![Fila(3), Fila(4)]);
    }

    #[test]
    fn filtering_resets_page() {
        let mut state: PageState<i64> = PageState::new(2);
        state.apply(PageAction::Pagina(3));
        state.apply(PageAction::Filtrar("x".into()));
        assert_eq!(state.lista.pagina, 1);
    }
}
