//! Constantes de configuration, figées à la compilation.

use gestion_core::DEFAULT_API_BASE;

/// `API_BASE_URL` (environnement ou `.env`) ou l'adresse locale par défaut.
pub const API_BASE: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE,
};

pub const PAGE_GRUPOS: usize = 6;
pub const PAGE_EQUIPOS: usize = 6;
pub const PAGE_DOCUMENTOS: usize = 6;
pub const PAGE_PERSONAS: usize = 10;
pub const PAGE_MEMORIAS: usize = 10;

/// Délai avant la redirection qui suit une inscription réussie.
pub const REDIRECCION_REGISTRO_MS: u32 = 2_000;
