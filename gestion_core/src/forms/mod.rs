//! Formulaires contrôlés : l'état brut (texte saisi) et sa validation
//! synchrone, qui produit la charge utile envoyée au backend.

pub mod cuenta;
pub mod documento;
pub mod equipo;
pub mod grupo;
pub mod memoria;
pub mod persona;

use once_cell::sync::Lazy;
use regex::Regex;

pub use cuenta::{LoginForm, RegistroForm, UsuarioForm};
pub use documento::{DocumentoEnvio, DocumentoForm};
pub use equipo::{EquipoForm, EquipoPayload};
pub use grupo::{GrupoForm, GrupoPayload};
pub use memoria::MemoriaForm;
pub use persona::{PersonaEnvio, PersonaForm};

use crate::error::{ApiError, FieldErrors};
use crate::role::Role;
use crate::session::Usuario;
use crate::Oid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Ver,
    Crear,
    Editar,
}

impl FormMode {
    pub fn solo_lectura(self) -> bool {
        self == FormMode::Ver
    }

    /// Libellé du bouton de validation de la modale.
    pub fn boton(self) -> Option<&'static str> {
        match self {
            FormMode::Ver => None,
            FormMode::Crear => Some("Crear"),
            FormMode::Editar => Some("Guardar"),
        }
    }

    /// Écriture à lancer à l'envoi ; une édition sans identifiant est refusée.
    pub fn escritura(self, id: Option<Oid>) -> Result<Option<Escritura>, ApiError> {
        match (self, id) {
            (FormMode::Ver, _) => Ok(None),
            (FormMode::Crear, _) => Ok(Some(Escritura::Crear)),
            (FormMode::Editar, Some(id)) => Ok(Some(Escritura::Editar(id))),
            (FormMode::Editar, None) => {
                let mut errores = FieldErrors::new();
                errores.add("id", "El registro no tiene identificador");
                Err(ApiError::Validation(errores))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Escritura {
    Crear,
    Editar(Oid),
}

/// Ce que la validation doit savoir de l'utilisateur courant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormContext {
    pub role: Role,
    pub grupo_usuario: Option<Oid>,
    pub anio_actual: i32,
}

impl FormContext {
    pub fn new(usuario: &Usuario, anio_actual: i32) -> Self {
        Self {
            role: usuario.rol_efectivo(),
            grupo_usuario: usuario.grupo_id(),
            anio_actual,
        }
    }

    pub fn es_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn ve_varios_grupos(&self) -> bool {
        self.role.can_view_multiple_groups()
    }

    /// Groupe cible : sélection pour l'administrateur, groupe de session sinon.
    pub fn grupo_destino(&self, seleccion: &str) -> Option<Oid> {
        if self.es_admin() {
            parse_oid(seleccion)
        } else {
            self.grupo_usuario
        }
    }
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn email_valido(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Champ de sélection vide → `None`.
pub fn parse_oid(raw: &str) -> Option<Oid> {
    raw.trim().parse().ok()
}

/// Saisie vide → `None` ; sinon le texte tel quel.
pub fn no_vacio(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Nombre saisi ; vide vaut `Ok(None)`, texte non numérique ou non fini
/// (`NaN`, `inf`) vaut `Err(())`.
pub fn parse_numero(raw: &str) -> Result<Option<f64>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(email_valido("grupo@utn.edu.ar"));
        assert!(!email_valido("grupo@utn"));
        assert!(!email_valido("gr upo@utn.ar"));
        assert!(!email_valido(""));
    }

    #[test]
    fn numeric_inputs() {
        assert_eq!(parse_numero(""), Ok(None));
        assert_eq!(parse_numero(" 12,5 "), Ok(Some(12.5)));
        assert_eq!(parse_numero("doce"), Err(()));
        assert_eq!(parse_numero("NaN"), Err(()));
        assert_eq!(parse_numero("inf"), Err(()));
        assert_eq!(parse_numero("-infinity"), Err(()));
        assert_eq!(parse_oid("7"), Some(7));
        assert_eq!(parse_oid(""), None);
    }

    #[test]
    fn submit_maps_to_write() {
        assert_eq!(FormMode::Ver.escritura(Some(3)), Ok(None));
        assert_eq!(FormMode::Crear.escritura(None), Ok(Some(Escritura::Crear)));
        assert_eq!(FormMode::Editar.escritura(Some(3)), Ok(Some(Escritura::Editar(3))));

        let err = FormMode::Editar.escritura(None).unwrap_err();
        assert!(matches!(&err, ApiError::Validation(e) if e.contains("id")));
    }

    #[test]
    fn target_group_depends_on_role() {
        let admin = FormContext { role: Role::Administrador, grupo_usuario: Some(1), anio_actual: 2025 };
        let director = FormContext { role: Role::Director, ..admin.clone() };
        assert_eq!(admin.grupo_destino(""), None);
        assert_eq!(admin.grupo_destino("4"), Some(4));
        assert_eq!(director.grupo_destino("4"), Some(1));
        assert!(admin.ve_varios_grupos());
        assert!(!director.ve_varios_grupos());
    }
}
