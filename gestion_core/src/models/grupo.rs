use serde::{Deserialize, Serialize};

use super::{GrupoRef, Keyed};
use crate::listing::Filtrable;
use crate::Oid;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grupo {
    #[serde(default, deserialize_with = "super::de::lenient_oid")]
    pub oid_grupo: Oid,
    #[serde(default)]
    pub nombre_grupo: String,
    #[serde(default)]
    pub sigla: String,
    #[serde(default)]
    pub email: String,
    /// Identifiant de persona à l'écriture, parfois un nom à la lecture.
    #[serde(default, deserialize_with = "super::de::string_or_number")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "super::de::string_or_number")]
    pub vice_director: Option<String>,
    #[serde(default)]
    pub objetivos: Option<String>,
    #[serde(default)]
    pub organigrama: Option<String>,
}

impl Grupo {
    pub fn referencia(&self) -> GrupoRef {
        GrupoRef {
            oid_grupo: self.oid_grupo,
            nombre_grupo: Some(self.nombre_grupo.clone()),
            sigla: Some(self.sigla.clone()),
        }
    }
}

impl Keyed for Grupo {
    fn key(&self) -> Oid {
        self.oid_grupo
    }
}

impl Filtrable for Grupo {
    fn campos_busqueda(&self) -> Vec<String> {
        vec![self.oid_grupo.to_string(), self.nombre_grupo.clone()]
    }
}
