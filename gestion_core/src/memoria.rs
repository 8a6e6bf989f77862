//! Détail d'une mémoire : en-tête, collections rattachées et candidats à
//! l'ajout.

use std::collections::HashSet;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::crud::{todas_las_personas, CrudService};
use crate::endpoints::{resolve_endpoints, Coleccion, EntityEndpoints, MemoriaEndpoints};
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest, ApiResponse, HttpBackend};
use crate::models::{Documento, Equipo, Keyed, Memoria, PersonaResumen};
use crate::permissions::Entidad;
use crate::Oid;

/// Éléments de `disponibles` absents de `adjuntos`, dans l'ordre d'origine.
pub fn available_minus_attached<T, A>(disponibles: &[T], adjuntos: &[A]) -> Vec<T>
where
    T: Keyed + Clone,
    A: Keyed,
{
    let tomados: HashSet<Oid> = adjuntos.iter().map(Keyed::key).collect();
    disponibles
        .iter()
        .filter(|d| !tomados.contains(&d.key()))
        .cloned()
        .collect()
}

/// `?modo=editar` ouvre le détail en gestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModoDetalle {
    #[default]
    Ver,
    Editar,
}

impl ModoDetalle {
    pub fn desde_query(query: &str) -> Self {
        let editar = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|par| par.split_once('='))
            .any(|(k, v)| k == "modo" && v == "editar");
        if editar { ModoDetalle::Editar } else { ModoDetalle::Ver }
    }

    pub fn editable(self) -> bool {
        self == ModoDetalle::Editar
    }
}

pub struct MemoriaService<'a, B> {
    client: &'a ApiClient<B>,
    endpoints: &'a EntityEndpoints,
    base: &'a str,
}

impl<'a, B: HttpBackend> MemoriaService<'a, B> {
    pub fn new(client: &'a ApiClient<B>, endpoints: &'a EntityEndpoints, base: &'a str) -> Self {
        Self { client, endpoints, base }
    }

    fn rutas(&self) -> Result<MemoriaEndpoints<'a>, ApiError> {
        self.endpoints
            .memorias()
            .ok_or_else(|| self.endpoints.missing("memorias"))
    }

    fn role(&self) -> &'static str {
        self.endpoints.role().map_or("", |r| r.as_str())
    }

    pub async fn listar(&self) -> Result<Vec<Memoria>, ApiError> {
        CrudService::new(self.client, self.endpoints).listar().await
    }

    pub async fn obtener(&self, id: Oid) -> Result<Memoria, ApiError> {
        CrudService::new(self.client, self.endpoints).obtener(id).await
    }

    /// Crée la mémoire de l'année.
    pub async fn crear(&self, grupo: Option<Oid>, anio: i32) -> Result<(), ApiError> {
        let url = self.rutas()?.crear(grupo, anio)?;
        self.client.execute(ApiRequest::post(url)).await.map(drop)
    }

    pub async fn exportar(&self, id: Oid) -> Result<ApiResponse, ApiError> {
        let url = self
            .rutas()?
            .exportar(id)
            .ok_or_else(|| self.endpoints.missing("exportar"))?;
        self.client.execute(ApiRequest::get(url)).await
    }

    pub async fn adjuntos<T: DeserializeOwned>(
        &self,
        coleccion: Coleccion,
        id: Oid,
    ) -> Result<Vec<T>, ApiError> {
        let url = self
            .rutas()?
            .listar(coleccion, id)
            .ok_or_else(|| self.endpoints.missing("listar"))?;
        debug!("memoria {id} : relecture des {}", coleccion.label());
        self.client.get_list(&url).await
    }

    /// Les quatre listes de personnes, chacune étiquetée par sa variante.
    /// Une liste en échec compte pour vide.
    pub async fn personas_disponibles(&self) -> Vec<PersonaResumen> {
        todas_las_personas(self.client, self.base, self.role())
            .await
            .iter()
            .map(|p| p.resumen())
            .collect()
    }

    pub async fn equipos_disponibles(&self) -> Vec<Equipo> {
        self.disponibles(Entidad::Equipos).await
    }

    pub async fn documentos_disponibles(&self) -> Vec<Documento> {
        self.disponibles(Entidad::Documentos).await
    }

    async fn disponibles<T: DeserializeOwned>(&self, entidad: Entidad) -> Vec<T> {
        let endpoints = resolve_endpoints(self.base, self.role(), entidad);
        CrudService::new(self.client, &endpoints)
            .listar()
            .await
            .unwrap_or_else(|e| {
                warn!("{} non disponibles : {e}", entidad.as_str());
                Vec::new()
            })
    }

    pub async fn agregar(&self, coleccion: Coleccion, id: Oid, item: Oid) -> Result<(), ApiError> {
        let request = self
            .rutas()?
            .agregar(coleccion, id, item)
            .ok_or_else(|| self.endpoints.missing("agregar"))?;
        self.client.execute(request).await.map(drop)
    }

    pub async fn quitar(&self, coleccion: Coleccion, id: Oid, item: Oid) -> Result<(), ApiError> {
        let request = self
            .rutas()?
            .quitar(coleccion, id, item)
            .ok_or_else(|| self.endpoints.missing("quitar"))?;
        self.client.execute(request).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::http::HttpMethod;
    use crate::test_utils::MemoryBackend;

    const BASE: &str = "http://api";

    #[derive(Clone, Debug, PartialEq)]
    struct Fila(Oid);

    impl Keyed for Fila {
        fn key(&self) -> Oid {
            self.0
        }
    }

    #[test]
    fn attached_items_are_excluded_in_order() {
        let disponibles = [Fila(5), Fila(1), Fila(3), Fila(2)];
        let adjuntos = [Fila(3), Fila(5), Fila(9)];

        let resto = available_minus_attached(&disponibles, &adjuntos);
        assert_eq!(resto, vec![Fila(1), Fila(2)]);
        assert_eq!(resto, available_minus_attached(&disponibles, &adjuntos));
        assert!(available_minus_attached::<Fila, Fila>(&[], &adjuntos).is_empty());
        assert_eq!(available_minus_attached::<Fila, Fila>(&disponibles, &[]).len(), 4);
    }

    #[test]
    fn edit_mode_from_query() {
        assert_eq!(ModoDetalle::desde_query("?modo=editar"), ModoDetalle::Editar);
        assert_eq!(ModoDetalle::desde_query("x=1&modo=editar"), ModoDetalle::Editar);
        assert_eq!(ModoDetalle::desde_query(""), ModoDetalle::Ver);
        assert_eq!(ModoDetalle::desde_query("?modo=ver"), ModoDetalle::Ver);
    }

    #[test]
    fn failing_persona_lists_degrade_to_empty() {
        let backend = MemoryBackend::new();
        backend.respond_json(
            "http://api/director/personas/becarios/listarBecarios",
            r#"[{"oidBecario": 4, "nombre": "Ana", "apellido": "Paz"}]"#,
        );
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "DIRECTOR", Entidad::Memorias);
        let service = MemoriaService::new(&client, &endpoints, BASE);

        let personas = block_on(service.personas_disponibles());
        assert_eq!(personas.len(), 1);
        assert_eq!(personas[0].oid_persona, 4);
        assert_eq!(personas[0].tipo_persona.as_deref(), Some("Becario"));
        assert_eq!(backend.requests().len(), 4);
    }

    #[test]
    fn add_and_remove_hit_join_endpoints() {
        let backend = MemoryBackend::new();
        backend.handler(|_| Some(ApiResponse::new(200, "")));
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "VICEDIRECTOR", Entidad::Memorias);
        let service = MemoriaService::new(&client, &endpoints, BASE);

        block_on(service.agregar(Coleccion::Equipos, 10, 3)).unwrap();
        block_on(service.quitar(Coleccion::Documentos, 10, 8)).unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://api/vicedirector/memorias/agregarEquipo/10/3");
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, "http://api/vicedirector/memorias/quitarDocumento/10/8");
    }

    #[test]
    fn integrante_cannot_manage_attachments() {
        let backend = MemoryBackend::new();
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "INTEGRANTE", Entidad::Memorias);
        let service = MemoriaService::new(&client, &endpoints, BASE);

        assert!(block_on(service.agregar(Coleccion::Personas, 1, 2)).is_err());
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn admin_creation_needs_group_and_year() {
        let backend = MemoryBackend::new();
        backend.handler(|req| {
            (req.method == HttpMethod::Post).then(|| ApiResponse::new(201, ""))
        });
        backend.respond_json(
            "http://api/administrador/memorias/listarMemorias",
            r#"[{"oidMemoria": 1, "anio": 2025, "grupo": {"oidGrupo": 2, "sigla": "GIS"}}]"#,
        );
        let client = ApiClient::new(&backend, None);
        let endpoints = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Memorias);
        let service = MemoriaService::new(&client, &endpoints, BASE);

        assert_eq!(block_on(service.crear(None, 2025)), Err(ApiError::MissingGroup));
        block_on(service.crear(Some(2), 2025)).unwrap();
        let memorias = block_on(service.listar()).unwrap();
        assert_eq!(memorias[0].anio, Some(2025));
        assert_eq!(
            backend.requests()[0].url,
            "http://api/administrador/memorias/agregarMemoria/2/2025"
        );
    }
}
