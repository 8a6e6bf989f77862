//! Table rôle → permissions, par type d'entité.

use crate::role::Role;

/// Les familles d'entités gérées par l'application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entidad {
    Grupos,
    Equipos,
    Documentos,
    Becarios,
    Investigadores,
    Personal,
    IntegrantesConsejoEducativo,
    Memorias,
}

impl Entidad {
    pub const PERSONAS: [Entidad; 4] = [
        Entidad::Becarios,
        Entidad::Investigadores,
        Entidad::IntegrantesConsejoEducativo,
        Entidad::Personal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Entidad::Grupos => "grupos",
            Entidad::Equipos => "equipos",
            Entidad::Documentos => "documentos",
            Entidad::Becarios => "becarios",
            Entidad::Investigadores => "investigadores",
            Entidad::Personal => "personal",
            Entidad::IntegrantesConsejoEducativo => "integrantesConsejoEducativo",
            Entidad::Memorias => "memorias",
        }
    }

    pub fn is_persona(self) -> bool {
        Self::PERSONAS.contains(&self)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permisos {
    pub ver_todos: bool,
    pub ver_propio: bool,
    pub crear: bool,
    pub editar: bool,
    pub eliminar: bool,
    pub buscar: bool,
    pub paginar: bool,
}

impl Permisos {
    const TOTAL: Permisos = Permisos {
        ver_todos: true,
        ver_propio: true,
        crear: true,
        editar: true,
        eliminar: true,
        buscar: true,
        paginar: true,
    };

    /// Gestion complète, limitée à son propre groupe.
    const GRUPO_PROPIO: Permisos = Permisos {
        ver_todos: false,
        ..Permisos::TOTAL
    };

    /// Lecture seule avec recherche et pagination.
    const LECTURA: Permisos = Permisos {
        ver_todos: false,
        ver_propio: true,
        crear: false,
        editar: false,
        eliminar: false,
        buscar: true,
        paginar: true,
    };

    const SOLO_VER: Permisos = Permisos {
        ver_todos: false,
        ver_propio: true,
        crear: false,
        editar: false,
        eliminar: false,
        buscar: false,
        paginar: false,
    };
}

pub fn permisos(role: Role, entidad: Entidad) -> Permisos {
    use Entidad::*;

    match (entidad, role) {
        (_, Role::Administrador) => Permisos::TOTAL,

        (Grupos, Role::Director) => Permisos { editar: true, ..Permisos::SOLO_VER },
        (Grupos, _) => Permisos::SOLO_VER,

        (Memorias, Role::Director | Role::Vicedirector) => Permisos {
            eliminar: false,
            ..Permisos::GRUPO_PROPIO
        },

        (_, Role::Director | Role::Vicedirector) => Permisos::GRUPO_PROPIO,
        (_, Role::Integrante) => Permisos::LECTURA,
    }
}

/// Jamais en échec : un rôle inconnu reçoit les permissions d'un INTEGRANTE.
pub fn resolve_permissions(role: &str, entidad: Entidad) -> Permisos {
    permisos(Role::resolve(role), entidad)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAS: [Entidad; 8] = [
        Entidad::Grupos,
        Entidad::Equipos,
        Entidad::Documentos,
        Entidad::Becarios,
        Entidad::Investigadores,
        Entidad::Personal,
        Entidad::IntegrantesConsejoEducativo,
        Entidad::Memorias,
    ];

    #[test]
    fn admin_can_do_everything() {
        for entidad in TODAS {
            assert_eq!(resolve_permissions("ADMINISTRADOR", entidad), Permisos::TOTAL);
        }
    }

    #[test]
    fn director_only_edits_own_group() {
        let p = resolve_permissions("DIRECTOR", Entidad::Grupos);
        assert!(p.editar);
        assert!(!p.crear && !p.eliminar && !p.buscar && !p.paginar && !p.ver_todos);

        let vice = resolve_permissions("VICEDIRECTOR", Entidad::Grupos);
        assert!(!vice.crear && !vice.editar && !vice.eliminar);
    }

    #[test]
    fn integrante_on_becarios_is_read_only_with_search() {
        let p = resolve_permissions("INTEGRANTE", Entidad::Becarios);
        assert!(!p.crear && !p.editar && !p.eliminar);
        assert!(p.buscar && p.paginar && p.ver_propio);
    }

    #[test]
    fn unknown_role_is_most_restrictive() {
        for entidad in TODAS {
            let p = resolve_permissions("hacker", entidad);
            assert!(!p.crear && !p.editar && !p.eliminar);
            assert!(!p.ver_todos);
        }
    }

    #[test]
    fn non_admin_roles_never_see_all() {
        for role in [Role::Director, Role::Vicedirector, Role::Integrante] {
            for entidad in TODAS {
                assert!(!permisos(role, entidad).ver_todos);
            }
        }
    }
}
