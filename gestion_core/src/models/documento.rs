use serde::{Deserialize, Serialize};

use super::{GrupoRef, Keyed};
use crate::listing::Filtrable;
use crate::Oid;

/// Le fichier binaire n'apparaît jamais ici : il voyage en partie multipart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    #[serde(default, deserialize_with = "super::de::lenient_oid")]
    pub oid_documento: Oid,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub autores: Option<String>,
    #[serde(default)]
    pub editorial: Option<String>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_i32")]
    pub anio: Option<i32>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_grupo: Option<Oid>,
    #[serde(default)]
    pub nombre_grupo: Option<String>,
    #[serde(default, skip_serializing)]
    pub grupo: Option<GrupoRef>,
}

impl Documento {
    pub fn grupo_id(&self) -> Option<Oid> {
        self.oid_grupo.or_else(|| self.grupo.as_ref().map(|g| g.oid_grupo))
    }

    pub fn nombre_del_grupo(&self) -> Option<&str> {
        self.nombre_grupo
            .as_deref()
            .or_else(|| self.grupo.as_ref().and_then(|g| g.nombre_grupo.as_deref()))
    }
}

impl Keyed for Documento {
    fn key(&self) -> Oid {
        self.oid_documento
    }
}

impl Filtrable for Documento {
    fn campos_busqueda(&self) -> Vec<String> {
        vec![
            self.titulo.clone(),
            self.editorial.clone().unwrap_or_default(),
            self.oid_documento.to_string(),
        ]
    }
}
