use serde::{Deserialize, Serialize};

use super::{GrupoRef, Keyed};
use crate::listing::Filtrable;
use crate::Oid;

/// Rapport annuel d'un groupe ; personnes, équipements et documents y sont
/// rattachés par jointure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MemoriaWire")]
pub struct Memoria {
    pub oid_memoria: Oid,
    pub anio: Option<i32>,
    pub grupo: Option<GrupoRef>,
}

/// Le groupe arrive imbriqué (`grupo`) ou à plat (`oidGrupo`, `nombreGrupo`, `sigla`).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemoriaWire {
    #[serde(default, deserialize_with = "super::de::lenient_oid")]
    oid_memoria: Oid,
    #[serde(default, deserialize_with = "super::de::lenient_opt_i32")]
    anio: Option<i32>,
    #[serde(default)]
    grupo: Option<GrupoRef>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    oid_grupo: Option<Oid>,
    #[serde(default)]
    nombre_grupo: Option<String>,
    #[serde(default)]
    sigla: Option<String>,
}

impl From<MemoriaWire> for Memoria {
    fn from(w: MemoriaWire) -> Self {
        let plano = (w.oid_grupo.is_some() || w.nombre_grupo.is_some() || w.sigla.is_some()).then(|| GrupoRef {
            oid_grupo: w.oid_grupo.unwrap_or_default(),
            nombre_grupo: w.nombre_grupo,
            sigla: w.sigla,
        });
        Memoria {
            oid_memoria: w.oid_memoria,
            anio: w.anio,
            grupo: w.grupo.or(plano),
        }
    }
}

impl Keyed for Memoria {
    fn key(&self) -> Oid {
        self.oid_memoria
    }
}

impl Filtrable for Memoria {
    fn campos_busqueda(&self) -> Vec<String> {
        let mut campos = vec![self.anio.map(|a| a.to_string()).unwrap_or_default()];
        if let Some(g) = &self.grupo {
            campos.extend(g.sigla.clone());
            campos.extend(g.nombre_grupo.clone());
        }
        campos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_group_is_read() {
        let m: Memoria = serde_json::from_str(
            r#"{"oidMemoria": 4, "anio": "2024", "grupo": {"oidGrupo": 2, "sigla": "GIDAS", "nombreGrupo": "Sistemas"}}"#,
        )
        .unwrap();
        assert_eq!(m.key(), 4);
        assert_eq!(m.anio, Some(2024));
        assert_eq!(m.grupo.unwrap().etiqueta(), "GIDAS - Sistemas");
    }

    #[test]
    fn flat_group_fields_are_accepted() {
        let m: Memoria =
            serde_json::from_str(r#"{"oidMemoria": "9", "anio": 2023, "oidGrupo": "3", "nombreGrupo": "Robótica"}"#).unwrap();
        let grupo = m.grupo.clone().unwrap();
        assert_eq!(grupo.oid_grupo, 3);
        assert_eq!(grupo.etiqueta(), "Robótica");
        assert!(m.campos_busqueda().contains(&"Robótica".to_string()));
    }

    #[test]
    fn memoria_without_group() {
        let m: Memoria = serde_json::from_str(r#"{"oidMemoria": 1, "anio": 2022}"#).unwrap();
        assert_eq!(m.grupo, None);
    }
}
