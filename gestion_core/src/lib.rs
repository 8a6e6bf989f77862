//! Logique métier de l'administration des groupes de recherche : rôles et
//! permissions, endpoints REST, modèles, formulaires, listes paginées et
//! services d'accès au backend. Aucun code navigateur ici.

pub mod alerta;
pub mod auth;
pub mod crud;
pub mod download;
pub mod endpoints;
pub mod error;
pub mod forms;
pub mod http;
pub mod listing;
pub mod memoria;
pub mod models;
pub mod permissions;
pub mod role;
pub mod session;

#[cfg(test)]
mod test_utils;

/// Identifiant numérique attribué par le backend.
pub type Oid = i64;

pub const DEFAULT_API_BASE: &str = "http://localhost:8081";

pub use alerta::{Alerta, TipoAlerta};
pub use endpoints::{resolve_endpoints, Coleccion, EntityEndpoints};
pub use error::{ApiError, FieldErrors};
pub use http::{ApiClient, ApiRequest, ApiResponse, HttpBackend};
pub use permissions::{resolve_permissions, Entidad, Permisos};
pub use role::Role;
pub use session::{SessionStore, Usuario};
