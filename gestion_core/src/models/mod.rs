//! Modèles échangés avec le backend (JSON camelCase).

mod de;
pub mod documento;
pub mod equipo;
pub mod grupo;
pub mod memoria;
pub mod persona;

use serde::{Deserialize, Serialize};

pub use documento::Documento;
pub use equipo::Equipo;
pub use grupo::Grupo;
pub use memoria::Memoria;
pub use persona::{DetallePersona, Persona, PersonaPayload, PersonaResumen, PersonaWire, TipoBecario, TipoPersona, TipoPersonal};

use crate::Oid;

/// Identifiant stable d'une ligne (clé de rendu, différence d'ensembles).
pub trait Keyed {
    fn key(&self) -> Oid;
}

/// Référence courte vers un groupe, telle qu'embarquée dans la session ou une mémoire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrupoRef {
    #[serde(default, deserialize_with = "de::lenient_oid")]
    pub oid_grupo: Oid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_grupo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigla: Option<String>,
}

impl GrupoRef {
    pub fn etiqueta(&self) -> String {
        match (&self.sigla, &self.nombre_grupo) {
            (Some(s), Some(n)) => format!("{s} - {n}"),
            (Some(s), None) => s.clone(),
            (None, Some(n)) => n.clone(),
            (None, None) => format!("Grupo {}", self.oid_grupo),
        }
    }
}

/// Valeur d'affichage par défaut des cellules vides.
pub fn o_guion(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
