use serde::{Deserialize, Serialize};

use super::{GrupoRef, Keyed};
use crate::listing::Filtrable;
use crate::Oid;

fn activo_por_defecto() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipo {
    #[serde(default, deserialize_with = "super::de::lenient_oid")]
    pub oid_equipo: Oid,
    #[serde(default)]
    pub denominacion: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha_incorporacion: Option<String>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_f64")]
    pub monto_invertido: Option<f64>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_grupo: Option<Oid>,
    #[serde(default)]
    pub nombre_grupo: Option<String>,
    #[serde(default, skip_serializing)]
    pub grupo: Option<GrupoRef>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

impl Equipo {
    pub fn grupo_id(&self) -> Option<Oid> {
        self.oid_grupo.or_else(|| self.grupo.as_ref().map(|g| g.oid_grupo))
    }

    pub fn nombre_del_grupo(&self) -> Option<&str> {
        self.nombre_grupo
            .as_deref()
            .or_else(|| self.grupo.as_ref().and_then(|g| g.nombre_grupo.as_deref()))
    }
}

impl Keyed for Equipo {
    fn key(&self) -> Oid {
        self.oid_equipo
    }
}

impl Filtrable for Equipo {
    fn campos_busqueda(&self) -> Vec<String> {
        vec![self.denominacion.clone(), self.oid_equipo.to_string()]
    }
}
