use std::fmt;

/// Les quatre rôles renvoyés par le backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Administrador,
    Director,
    Vicedirector,
    Integrante,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Administrador,
        Role::Director,
        Role::Vicedirector,
        Role::Integrante,
    ];

    /// Insensible à la casse : "Administrador", "ADMINISTRADOR", "ViceDirector"…
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
            .collect();

        match normalized.as_str() {
            "ADMINISTRADOR" => Some(Role::Administrador),
            "DIRECTOR" => Some(Role::Director),
            "VICEDIRECTOR" => Some(Role::Vicedirector),
            "INTEGRANTE" => Some(Role::Integrante),
            _ => None,
        }
    }

    /// Rôle effectif : un rôle inconnu est traité comme le plus restreint.
    pub fn resolve(raw: &str) -> Role {
        Role::parse(raw).unwrap_or(Role::Integrante)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Director => "DIRECTOR",
            Role::Vicedirector => "VICEDIRECTOR",
            Role::Integrante => "INTEGRANTE",
        }
    }

    /// Premier segment des chemins de l'API.
    pub fn path_segment(self) -> &'static str {
        match self {
            Role::Administrador => "administrador",
            Role::Director => "director",
            Role::Vicedirector => "vicedirector",
            Role::Integrante => "integrante",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Director => "Director",
            Role::Vicedirector => "Vicedirector",
            Role::Integrante => "Integrante",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Administrador
    }

    pub fn can_view_multiple_groups(self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vrai pour tout rôle connu : la page affiche alors son tableau.
pub fn needs_table(raw: &str) -> bool {
    Role::parse(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_separators() {
        assert_eq!(Role::parse("Administrador"), Some(Role::Administrador));
        assert_eq!(Role::parse("ADMINISTRADOR"), Some(Role::Administrador));
        assert_eq!(Role::parse("ViceDirector"), Some(Role::Vicedirector));
        assert_eq!(Role::parse("vice_director"), Some(Role::Vicedirector));
        assert_eq!(Role::parse(" integrante "), Some(Role::Integrante));
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn unknown_role_resolves_to_integrante() {
        assert_eq!(Role::resolve("SUPERUSER"), Role::Integrante);
        assert!(!needs_table("SUPERUSER"));
        assert!(needs_table("director"));
    }

    #[test]
    fn only_admin_sees_every_group() {
        for role in Role::ALL {
            assert_eq!(role.can_view_multiple_groups(), role == Role::Administrador);
        }
    }
}
