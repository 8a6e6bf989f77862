//! Table rôle → URLs du backend.
//!
//! Chaque chemin a la forme `{base}/{rôle}/{gabarit}` ; les gabarits portent
//! les jokers `{id}`, `{grupo}`, `{anio}` et `{item}`.

use crate::error::ApiError;
use crate::http::{ApiRequest, HttpMethod};
use crate::permissions::Entidad;
use crate::role::Role;
use crate::Oid;

/// Fermeture de suppression : DELETE définitif ou PUT « quitar » selon le rôle.
pub type Remover = Box<dyn Fn(Oid) -> ApiRequest>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Suppression définitive (DELETE).
    Eliminar,
    /// Désactivation (PUT quitar…).
    Desactivar,
}

impl Removal {
    pub fn verbo(self) -> &'static str {
        match self {
            Removal::Eliminar => "eliminar",
            Removal::Desactivar => "desactivar",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Plantillas {
    listar: Option<&'static str>,
    ver: Option<&'static str>,
    obtener: Option<&'static str>,
    crear: Option<&'static str>,
    actualizar: Option<&'static str>,
    eliminar: Option<(HttpMethod, &'static str)>,
    descargar: Option<&'static str>,
}

fn plantillas(role: Role, entidad: Entidad) -> Plantillas {
    use Entidad::*;
    use HttpMethod::{Delete, Put};
    use Role::*;

    match (entidad, role) {
        /* ---------------- grupos ---------------- */
        (Grupos, Administrador) => Plantillas {
            listar: Some("grupos/listarGrupos"),
            obtener: Some("grupos/obtenerGrupo/{id}"),
            crear: Some("grupos/agregarGrupo"),
            actualizar: Some("grupos/actualizarGrupo/{id}"),
            eliminar: Some((Delete, "grupos/eliminarGrupo/{id}")),
            ..Default::default()
        },
        (Grupos, Director) => Plantillas {
            ver: Some("grupo/ver"),
            actualizar: Some("grupo/editar"),
            ..Default::default()
        },
        (Grupos, Vicedirector | Integrante) => Plantillas {
            ver: Some("grupo/ver"),
            ..Default::default()
        },

        /* ---------------- equipos ---------------- */
        (Equipos, Administrador) => Plantillas {
            listar: Some("equipos/listarEquipos"),
            obtener: Some("equipos/obtenerEquipo/{id}"),
            crear: Some("equipos/agregarEquipo/{grupo}"),
            actualizar: Some("equipos/actualizarEquipo/{id}"),
            eliminar: Some((Delete, "equipos/eliminarEquipo/{id}")),
            ..Default::default()
        },
        (Equipos, Director | Vicedirector) => Plantillas {
            listar: Some("equipos/listarEquipos"),
            obtener: Some("equipos/obtenerEquipo/{id}"),
            crear: Some("equipos/agregarEquipo"),
            actualizar: Some("equipos/actualizarEquipo/{id}"),
            eliminar: Some((Put, "equipos/quitarEquipo/{id}")),
            ..Default::default()
        },
        (Equipos, Integrante) => Plantillas {
            listar: Some("equipos/listarEquipo"),
            obtener: Some("equipos/obtenerEquipo/{id}"),
            ..Default::default()
        },

        /* ---------------- documentos ---------------- */
        (Documentos, Administrador) => Plantillas {
            listar: Some("documentos/listarDocumentos"),
            obtener: Some("documentos/obtenerDocumento/{id}"),
            crear: Some("documentos/agregarDocumento/{grupo}"),
            actualizar: Some("documentos/actualizarDocumento/{id}"),
            eliminar: Some((Delete, "documentos/eliminarDocumento/{id}")),
            descargar: Some("documentos/descargarDocumento/{id}"),
            ..Default::default()
        },
        (Documentos, Director | Vicedirector) => Plantillas {
            listar: Some("documentos/listarDocumentos"),
            obtener: Some("documentos/obtenerDocumento/{id}"),
            crear: Some("documentos/agregarDocumento"),
            actualizar: Some("documentos/actualizarDocumento/{id}"),
            eliminar: Some((Put, "documentos/quitarDocumento/{id}")),
            descargar: Some("documentos/descargarDocumento/{id}"),
            ..Default::default()
        },
        (Documentos, Integrante) => Plantillas {
            listar: Some("documentos/listarDocumentos"),
            obtener: Some("documentos/obtenerDocumento/{id}"),
            descargar: Some("documentos/descargarDocumento/{id}"),
            ..Default::default()
        },

        /* ---------------- personas ---------------- */
        (Becarios | Investigadores | Personal | IntegrantesConsejoEducativo, _) => {
            plantillas_persona(role, entidad)
        }

        /* ---------------- memorias ---------------- */
        (Memorias, Administrador) => Plantillas {
            listar: Some("memorias/listarMemorias"),
            obtener: Some("memorias/obtenerMemoria/{id}"),
            crear: Some("memorias/agregarMemoria/{grupo}/{anio}"),
            descargar: Some("memorias/exportarMemoria/{id}"),
            ..Default::default()
        },
        (Memorias, Director | Vicedirector) => Plantillas {
            listar: Some("memorias/listarMemorias"),
            obtener: Some("memorias/obtenerMemoria/{id}"),
            crear: Some("memorias/agregarMemoria/{anio}"),
            descargar: Some("memorias/exportarMemoria/{id}"),
            ..Default::default()
        },
        (Memorias, Integrante) => Plantillas {
            listar: Some("memorias/listarMemorias"),
            obtener: Some("memorias/obtenerMemoria/{id}"),
            descargar: Some("memorias/exportarMemoria/{id}"),
            ..Default::default()
        },
    }
}

fn plantillas_persona(role: Role, entidad: Entidad) -> Plantillas {
    use Role::*;

    let listar = match entidad {
        Entidad::Becarios => "personas/becarios/listarBecarios",
        Entidad::Investigadores => "personas/investigadores/listarInvestigadores",
        Entidad::Personal => "personas/personal/listarPersonal",
        _ => "personas/integrantesConsejoEducativo/listarIntegrantesConsejoEducativo",
    };

    // Les chemins de détail ne sont pas uniformes côté backend.
    let obtener = match (entidad, role) {
        (Entidad::Becarios, Director | Integrante) => "becarios/obtenerBecario/{id}",
        (Entidad::Becarios, _) => "personas/becarios/obtenerBecario/{id}",
        (Entidad::Investigadores, Director) => "investigadores/obtenerInvestigador/{id}",
        (Entidad::Investigadores, _) => "personas/investigadores/obtenerInvestigador/{id}",
        (Entidad::Personal, _) => "personas/personal/obtenerPersonal/{id}",
        _ => "personas/integrantesConsejoEducativo/obtenerIntegranteConsejoEducativo/{id}",
    };

    let lectura = Plantillas {
        listar: Some(listar),
        obtener: Some(obtener),
        ..Default::default()
    };

    match role {
        Integrante => lectura,
        Administrador => Plantillas {
            crear: Some("personas/agregarPersona/{grupo}"),
            actualizar: Some("personas/actualizarPersona/{id}"),
            eliminar: Some((HttpMethod::Put, "personas/quitarPersona/{id}")),
            ..lectura
        },
        Director | Vicedirector => Plantillas {
            crear: Some("personas/agregarPersona"),
            actualizar: Some("personas/actualizarPersona/{id}"),
            eliminar: Some((HttpMethod::Put, "personas/quitarPersona/{id}")),
            ..lectura
        },
    }
}

/* -------------------------------------------------------------------------- */
/*                             jeu d'URLs résolu                               */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityEndpoints {
    base: String,
    role: Option<Role>,
    entidad: Entidad,
    plantillas: Plantillas,
}

/// Ne panique jamais. Rôle inconnu : aucun endpoint, sauf pour les groupes
/// qui retombent sur la vue INTEGRANTE.
pub fn resolve_endpoints(base: &str, role: &str, entidad: Entidad) -> EntityEndpoints {
    let role = match (Role::parse(role), entidad) {
        (None, Entidad::Grupos) => Some(Role::Integrante),
        (r, _) => r,
    };

    EntityEndpoints {
        base: base.trim_end_matches('/').to_string(),
        role,
        entidad,
        plantillas: role.map(|r| plantillas(r, entidad)).unwrap_or_default(),
    }
}

impl EntityEndpoints {
    pub fn entidad(&self) -> Entidad {
        self.entidad
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    fn url(&self, plantilla: &str, vars: &[(&str, String)]) -> Option<String> {
        let role = self.role?;
        let mut path = plantilla.to_string();
        for (name, value) in vars {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        Some(format!("{}/{}/{}", self.base, role.path_segment(), path))
    }

    fn with_id(&self, plantilla: Option<&'static str>, id: Oid) -> Option<String> {
        self.url(plantilla?, &[("id", id.to_string())])
    }

    pub fn missing(&self, operacion: &'static str) -> ApiError {
        ApiError::MissingEndpoint {
            entidad: self.entidad.as_str(),
            operacion,
        }
    }

    pub fn listar(&self) -> Option<String> {
        self.url(self.plantillas.listar?, &[])
    }

    /// Vue « mon groupe » des rôles non administrateurs.
    pub fn ver(&self) -> Option<String> {
        self.url(self.plantillas.ver?, &[])
    }

    /// Liste complète si disponible, sinon la vue propre au rôle.
    pub fn listar_o_ver(&self) -> Option<String> {
        self.listar().or_else(|| self.ver())
    }

    pub fn obtener(&self, id: Oid) -> Option<String> {
        self.with_id(self.plantillas.obtener, id)
    }

    pub fn actualizar(&self, id: Oid) -> Option<String> {
        self.with_id(self.plantillas.actualizar, id)
    }

    pub fn descargar(&self, id: Oid) -> Option<String> {
        self.with_id(self.plantillas.descargar, id)
    }

    pub fn puede_crear(&self) -> bool {
        self.plantillas.crear.is_some()
    }

    pub fn crear(&self, grupo: Option<Oid>) -> Result<String, ApiError> {
        self.crear_con(grupo, None)
    }

    fn crear_con(&self, grupo: Option<Oid>, anio: Option<i32>) -> Result<String, ApiError> {
        let plantilla = self.plantillas.crear.ok_or_else(|| self.missing("crear"))?;

        let mut vars = Vec::new();
        if plantilla.contains("{grupo}") {
            vars.push(("grupo", grupo.ok_or(ApiError::MissingGroup)?.to_string()));
        }
        if plantilla.contains("{anio}") {
            vars.push(("anio", anio.ok_or_else(|| self.missing("crear"))?.to_string()));
        }
        self.url(plantilla, &vars).ok_or_else(|| self.missing("crear"))
    }

    pub fn removal(&self) -> Option<Removal> {
        self.plantillas.eliminar.map(|(method, _)| match method {
            HttpMethod::Delete => Removal::Eliminar,
            _ => Removal::Desactivar,
        })
    }

    /// Politique de suppression du rôle, encapsulée. `None` si le rôle ne peut
    /// rien retirer.
    pub fn delete_or_deactivate(&self) -> Option<Remover> {
        let (method, plantilla) = self.plantillas.eliminar?;
        let prefix = self.url("", &[])?;

        Some(Box::new(move |id: Oid| {
            let path = plantilla.replace("{id}", &id.to_string());
            ApiRequest::new(method, format!("{prefix}{path}"))
        }))
    }

    pub fn memorias(&self) -> Option<MemoriaEndpoints<'_>> {
        (self.entidad == Entidad::Memorias && self.role.is_some()).then_some(MemoriaEndpoints(self))
    }
}

/* -------------------------------------------------------------------------- */
/*                  mémoires : création annuelle + jointures                   */
/* -------------------------------------------------------------------------- */

/// Collections rattachées à une mémoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coleccion {
    Personas,
    Equipos,
    Documentos,
}

impl Coleccion {
    pub const ALL: [Coleccion; 3] = [Coleccion::Personas, Coleccion::Equipos, Coleccion::Documentos];

    fn plural(self) -> &'static str {
        match self {
            Coleccion::Personas => "Personas",
            Coleccion::Equipos => "Equipos",
            Coleccion::Documentos => "Documentos",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Coleccion::Personas => "Persona",
            Coleccion::Equipos => "Equipo",
            Coleccion::Documentos => "Documento",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Coleccion::Personas => "personas",
            Coleccion::Equipos => "equipos",
            Coleccion::Documentos => "documentos",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MemoriaEndpoints<'a>(&'a EntityEndpoints);

impl MemoriaEndpoints<'_> {
    fn puede_gestionar(&self) -> bool {
        self.0.role.is_some_and(|r| r != Role::Integrante)
    }

    pub fn crear(&self, grupo: Option<Oid>, anio: i32) -> Result<String, ApiError> {
        self.0.crear_con(grupo, Some(anio))
    }

    pub fn exportar(&self, id: Oid) -> Option<String> {
        self.0.descargar(id)
    }

    pub fn listar(&self, coleccion: Coleccion, id: Oid) -> Option<String> {
        let plantilla = format!("memorias/listar{}/{{id}}", coleccion.plural());
        self.0.url(&plantilla, &[("id", id.to_string())])
    }

    pub fn agregar(&self, coleccion: Coleccion, id: Oid, item: Oid) -> Option<ApiRequest> {
        self.join(coleccion, "agregar", HttpMethod::Post, id, item)
    }

    pub fn quitar(&self, coleccion: Coleccion, id: Oid, item: Oid) -> Option<ApiRequest> {
        self.join(coleccion, "quitar", HttpMethod::Delete, id, item)
    }

    fn join(
        &self,
        coleccion: Coleccion,
        verbo: &str,
        method: HttpMethod,
        id: Oid,
        item: Oid,
    ) -> Option<ApiRequest> {
        if !self.puede_gestionar() {
            return None;
        }
        let plantilla = format!("memorias/{verbo}{}/{{id}}/{{item}}", coleccion.singular());
        let url = self
            .0
            .url(&plantilla, &[("id", id.to_string()), ("item", item.to_string())])?;
        Some(ApiRequest::new(method, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8081";

    #[test]
    fn admin_paths_match_backend_layout() {
        let e = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Grupos);
        assert_eq!(e.listar().unwrap(), "http://localhost:8081/administrador/grupos/listarGrupos");
        assert_eq!(
            e.actualizar(4).unwrap(),
            "http://localhost:8081/administrador/grupos/actualizarGrupo/4"
        );
        assert_eq!(e.ver(), None);

        let b = resolve_endpoints(BASE, "Administrador", Entidad::Becarios);
        assert_eq!(
            b.crear(Some(9)).unwrap(),
            "http://localhost:8081/administrador/personas/agregarPersona/9"
        );
    }

    #[test]
    fn admin_create_without_group_is_rejected() {
        let e = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Equipos);
        assert_eq!(e.crear(None), Err(ApiError::MissingGroup));
    }

    #[test]
    fn director_create_ignores_group() {
        let e = resolve_endpoints(BASE, "DIRECTOR", Entidad::Documentos);
        assert_eq!(
            e.crear(Some(1)).unwrap(),
            "http://localhost:8081/director/documentos/agregarDocumento"
        );
    }

    #[test]
    fn admin_removal_is_delete_director_is_put_quitar() {
        let admin = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Equipos);
        let req = (admin.delete_or_deactivate().unwrap())(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8081/administrador/equipos/eliminarEquipo/5");
        assert_eq!(admin.removal(), Some(Removal::Eliminar));

        for role in ["DIRECTOR", "VICEDIRECTOR"] {
            let e = resolve_endpoints(BASE, role, Entidad::Documentos);
            let req = (e.delete_or_deactivate().unwrap())(8);
            assert_eq!(req.method, HttpMethod::Put);
            assert!(req.url.ends_with("/documentos/quitarDocumento/8"));
            assert_eq!(e.removal(), Some(Removal::Desactivar));
        }
    }

    #[test]
    fn persona_removal_is_quitar_for_every_role() {
        let e = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Personal);
        let req = (e.delete_or_deactivate().unwrap())(2);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:8081/administrador/personas/quitarPersona/2");
    }

    #[test]
    fn integrante_has_no_write_endpoints() {
        for entidad in [Entidad::Equipos, Entidad::Documentos, Entidad::Becarios] {
            let e = resolve_endpoints(BASE, "INTEGRANTE", entidad);
            assert!(e.delete_or_deactivate().is_none());
            assert!(!e.puede_crear());
            assert!(e.actualizar(1).is_none());
            assert!(e.listar().is_some());
        }
        let eq = resolve_endpoints(BASE, "INTEGRANTE", Entidad::Equipos);
        assert!(eq.listar().unwrap().ends_with("/integrante/equipos/listarEquipo"));
    }

    #[test]
    fn director_group_view_and_edit_have_no_id() {
        let e = resolve_endpoints(BASE, "DIRECTOR", Entidad::Grupos);
        assert_eq!(e.listar_o_ver().unwrap(), "http://localhost:8081/director/grupo/ver");
        assert_eq!(e.actualizar(3).unwrap(), "http://localhost:8081/director/grupo/editar");
        assert!(e.delete_or_deactivate().is_none());
    }

    #[test]
    fn unknown_role_yields_no_operations() {
        let e = resolve_endpoints(BASE, "nadie", Entidad::Becarios);
        assert_eq!(e.role(), None);
        assert!(e.listar().is_none());
        assert!(e.delete_or_deactivate().is_none());
        assert!(matches!(e.crear(Some(1)), Err(ApiError::MissingEndpoint { .. })));

        let g = resolve_endpoints(BASE, "nadie", Entidad::Grupos);
        assert_eq!(g.ver().unwrap(), "http://localhost:8081/integrante/grupo/ver");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let e = resolve_endpoints("http://api/", "INTEGRANTE", Entidad::Documentos);
        assert_eq!(
            e.descargar(7).unwrap(),
            "http://api/integrante/documentos/descargarDocumento/7"
        );
    }

    #[test]
    fn memoria_creation_and_join_paths() {
        let admin = resolve_endpoints(BASE, "ADMINISTRADOR", Entidad::Memorias);
        let m = admin.memorias().unwrap();
        assert_eq!(
            m.crear(Some(3), 2024).unwrap(),
            "http://localhost:8081/administrador/memorias/agregarMemoria/3/2024"
        );
        assert_eq!(m.crear(None, 2024), Err(ApiError::MissingGroup));

        let add = m.agregar(Coleccion::Equipos, 10, 4).unwrap();
        assert_eq!(add.method, HttpMethod::Post);
        assert_eq!(add.url, "http://localhost:8081/administrador/memorias/agregarEquipo/10/4");

        let rm = m.quitar(Coleccion::Personas, 10, 6).unwrap();
        assert_eq!(rm.method, HttpMethod::Delete);
        assert!(rm.url.ends_with("/memorias/quitarPersona/10/6"));

        let director = resolve_endpoints(BASE, "DIRECTOR", Entidad::Memorias);
        assert_eq!(
            director.memorias().unwrap().crear(None, 2023).unwrap(),
            "http://localhost:8081/director/memorias/agregarMemoria/2023"
        );
    }

    #[test]
    fn integrante_reads_memorias_without_managing_them() {
        let e = resolve_endpoints(BASE, "INTEGRANTE", Entidad::Memorias);
        let m = e.memorias().unwrap();
        assert!(m.listar(Coleccion::Documentos, 1).is_some());
        assert!(m.exportar(1).is_some());
        assert!(m.agregar(Coleccion::Documentos, 1, 2).is_none());
        assert!(m.crear(None, 2024).is_err());
    }
}
