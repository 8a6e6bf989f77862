//! Session utilisateur persistée sous la clé `usuario`.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::GrupoRef;
use crate::role::Role;
use crate::Oid;

pub const SESSION_KEY: &str = "usuario";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[serde(default)]
    pub email: String,
    /// Rôle tel que renvoyé par le backend, casse d'origine.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub grupo: Option<GrupoRef>,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub logged_in: bool,
}

impl Usuario {
    pub fn rol(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn rol_efectivo(&self) -> Role {
        Role::resolve(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.rol() == Some(Role::Administrador)
    }

    pub fn is_authenticated(&self) -> bool {
        self.logged_in && !self.token.is_empty()
    }

    pub fn grupo_id(&self) -> Option<Oid> {
        self.grupo.as_ref().map(|g| g.oid_grupo)
    }

    pub fn token(&self) -> Option<&str> {
        (!self.token.is_empty()).then_some(self.token.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("almacenamiento no disponible: {0}")]
    Storage(String),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Stockage clé-valeur de la session (localStorage côté navigateur).
pub trait SessionStore {
    fn load_raw(&self) -> Option<String>;
    fn save_raw(&self, raw: &str) -> Result<(), SessionError>;
    fn clear(&self);

    /// Une valeur illisible est ignorée, l'utilisateur devra se reconnecter.
    fn load(&self) -> Option<Usuario> {
        let raw = self.load_raw()?;
        match serde_json::from_str::<Usuario>(&raw) {
            Ok(u) => Some(u),
            Err(e) => {
                warn!("session illisible, ignorée : {e}");
                None
            }
        }
    }

    fn save(&self, usuario: &Usuario) -> Result<(), SessionError> {
        self.save_raw(&serde_json::to_string(usuario)?)
    }
}

/* -------------------------------------------------------------------------- */
/*                           garde de navigation                               */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipoRuta {
    /// /login, /register
    Publica,
    Protegida,
    /// Réservée aux administrateurs.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acceso {
    Mostrar,
    RedirigirLogin,
    RedirigirHome,
}

pub fn acceso(ruta: TipoRuta, usuario: Option<&Usuario>) -> Acceso {
    let autenticado = usuario.is_some_and(Usuario::is_authenticated);

    match ruta {
        TipoRuta::Publica if autenticado => Acceso::RedirigirHome,
        TipoRuta::Publica => Acceso::Mostrar,
        _ if !autenticado => Acceso::RedirigirLogin,
        TipoRuta::Admin if !usuario.is_some_and(Usuario::is_admin) => Acceso::RedirigirHome,
        _ => Acceso::Mostrar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemorySessionStore;

    fn usuario(role: &str) -> Usuario {
        Usuario {
            email: "a@b.com".into(),
            role: role.into(),
            grupo: Some(GrupoRef { oid_grupo: 3, nombre_grupo: None, sigla: Some("GIS".into()) }),
            token: "jwt".into(),
            logged_in: true,
        }
    }

    #[test]
    fn session_round_trips_through_store() {
        let store = MemorySessionStore::default();
        store.save(&usuario("DIRECTOR")).unwrap();

        let raw = store.load_raw().unwrap();
        assert!(raw.contains("\"loggedIn\":true"));
        assert_eq!(store.load().unwrap().grupo_id(), Some(3));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_session_is_ignored() {
        let store = MemorySessionStore::default();
        store.save_raw("{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn guard_redirects() {
        let admin = usuario("Administrador");
        let integrante = usuario("INTEGRANTE");
        let expired = Usuario { token: String::new(), ..usuario("DIRECTOR") };

        assert_eq!(acceso(TipoRuta::Protegida, None), Acceso::RedirigirLogin);
        assert_eq!(acceso(TipoRuta::Protegida, Some(&expired)), Acceso::RedirigirLogin);
        assert_eq!(acceso(TipoRuta::Publica, None), Acceso::Mostrar);
        assert_eq!(acceso(TipoRuta::Publica, Some(&integrante)), Acceso::RedirigirHome);
        assert_eq!(acceso(TipoRuta::Admin, Some(&integrante)), Acceso::RedirigirHome);
        assert_eq!(acceso(TipoRuta::Admin, Some(&admin)), Acceso::Mostrar);
        assert_eq!(acceso(TipoRuta::Protegida, Some(&integrante)), Acceso::Mostrar);
    }
}
