//! Personnes : quatre variantes partageant un tronc commun.
//!
//! Les listes du backend n'indiquent pas toujours `tipoPersona` ; la variante
//! est alors celle de l'endpoint interrogé (voir [`Persona::from_wire`]).

use serde::{Deserialize, Serialize};

use super::Keyed;
use crate::listing::Filtrable;
use crate::permissions::Entidad;
use crate::Oid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TipoPersona {
    Becario,
    Investigador,
    Personal,
    IntegranteConsejoEducativo,
}

impl TipoPersona {
    pub const ALL: [TipoPersona; 4] = [
        TipoPersona::Becario,
        TipoPersona::Investigador,
        TipoPersona::IntegranteConsejoEducativo,
        TipoPersona::Personal,
    ];

    /// Valeur du champ `tipoPersona` attendue par le backend.
    pub fn as_str(self) -> &'static str {
        match self {
            TipoPersona::Becario => "Becario",
            TipoPersona::Investigador => "Investigador",
            TipoPersona::Personal => "Personal",
            TipoPersona::IntegranteConsejoEducativo => "IntegranteConsejoEducativo",
        }
    }

    pub fn parse(raw: &str) -> Option<TipoPersona> {
        match raw.trim() {
            "Becario" => Some(TipoPersona::Becario),
            "Investigador" => Some(TipoPersona::Investigador),
            "Personal" => Some(TipoPersona::Personal),
            "IntegranteConsejoEducativo" | "IntegranteCE" => {
                Some(TipoPersona::IntegranteConsejoEducativo)
            }
            _ => None,
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            TipoPersona::Becario => "Becario",
            TipoPersona::Investigador => "Investigador",
            TipoPersona::Personal => "Personal",
            TipoPersona::IntegranteConsejoEducativo => "Integrante del Consejo Educativo",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            TipoPersona::Becario => "Becarios",
            TipoPersona::Investigador => "Investigadores",
            TipoPersona::Personal => "Personal",
            TipoPersona::IntegranteConsejoEducativo => "Integrantes del Consejo Educativo",
        }
    }

    pub fn entidad(self) -> Entidad {
        match self {
            TipoPersona::Becario => Entidad::Becarios,
            TipoPersona::Investigador => Entidad::Investigadores,
            TipoPersona::Personal => Entidad::Personal,
            TipoPersona::IntegranteConsejoEducativo => Entidad::IntegrantesConsejoEducativo,
        }
    }

    pub fn from_entidad(entidad: Entidad) -> Option<TipoPersona> {
        TipoPersona::ALL.into_iter().find(|t| t.entidad() == entidad)
    }

    /// Détail vide de la variante (formulaire de création).
    pub fn detalle_vacio(self) -> DetallePersona {
        match self {
            TipoPersona::Becario => DetallePersona::Becario {
                fuente_financiamiento: None,
                tipo_becario: None,
            },
            TipoPersona::Investigador => DetallePersona::Investigador {
                categoria_utn: None,
                programa_de_incentivos: None,
                dedicacion: None,
                grado_academico: None,
            },
            TipoPersona::Personal => DetallePersona::Personal { tipo_personal: None },
            TipoPersona::IntegranteConsejoEducativo => {
                DetallePersona::IntegranteConsejoEducativo { cargo: None }
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                         énumérations de sélection                           */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipoBecario {
    Doctorado,
    MaestriaYOEspecializacion,
    BecarioGraduado,
    BecarioAlumno,
    Pasante,
    ProyectoFinalYTesinaDeGradoYOTrabajoFinalYTesisDePosgrado,
}

impl TipoBecario {
    pub const ALL: [TipoBecario; 6] = [
        TipoBecario::Doctorado,
        TipoBecario::MaestriaYOEspecializacion,
        TipoBecario::BecarioGraduado,
        TipoBecario::BecarioAlumno,
        TipoBecario::Pasante,
        TipoBecario::ProyectoFinalYTesinaDeGradoYOTrabajoFinalYTesisDePosgrado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TipoBecario::Doctorado => "Doctorado",
            TipoBecario::MaestriaYOEspecializacion => "MaestriaYOEspecializacion",
            TipoBecario::BecarioGraduado => "BecarioGraduado",
            TipoBecario::BecarioAlumno => "BecarioAlumno",
            TipoBecario::Pasante => "Pasante",
            TipoBecario::ProyectoFinalYTesinaDeGradoYOTrabajoFinalYTesisDePosgrado => {
                "ProyectoFinalYTesinaDeGradoYOTrabajoFinalYTesisDePosgrado"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TipoBecario::Doctorado => "Doctorado",
            TipoBecario::MaestriaYOEspecializacion => "Maestría o Especialización",
            TipoBecario::BecarioGraduado => "Becario Graduado",
            TipoBecario::BecarioAlumno => "Becario Alumno",
            TipoBecario::Pasante => "Pasante",
            TipoBecario::ProyectoFinalYTesinaDeGradoYOTrabajoFinalYTesisDePosgrado => {
                "Proyecto Final / Tesis"
            }
        }
    }

    pub fn parse(raw: &str) -> Option<TipoBecario> {
        TipoBecario::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    /// Libellé lisible, ou la valeur brute si elle est inconnue.
    pub fn formatear(raw: Option<&str>) -> String {
        match raw {
            Some(r) => TipoBecario::parse(r).map_or_else(|| r.to_string(), |t| t.label().to_string()),
            None => "-".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipoPersonal {
    PersonalProfesional,
    PersonalTecnicoAdministrativoYDeApoyo,
}

impl TipoPersonal {
    pub const ALL: [TipoPersonal; 2] = [
        TipoPersonal::PersonalProfesional,
        TipoPersonal::PersonalTecnicoAdministrativoYDeApoyo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TipoPersonal::PersonalProfesional => "PersonalProfesional",
            TipoPersonal::PersonalTecnicoAdministrativoYDeApoyo => {
                "PersonalTecnicoAdministrativoYDeApoyo"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TipoPersonal::PersonalProfesional => "Personal Profesional",
            TipoPersonal::PersonalTecnicoAdministrativoYDeApoyo => {
                "Personal Técnico, Administrativo y de Apoyo"
            }
        }
    }

    pub fn formatear(raw: Option<&str>) -> String {
        match raw {
            Some(r) => TipoPersonal::ALL
                .into_iter()
                .find(|t| t.as_str() == r)
                .map_or_else(|| r.to_string(), |t| t.label().to_string()),
            None => "-".to_string(),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                 modèles                                     */
/* -------------------------------------------------------------------------- */

/// Champs propres à chaque variante, étiquetés par `tipoPersona`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipoPersona")]
pub enum DetallePersona {
    Becario {
        #[serde(rename = "fuenteFinanciamiento")]
        fuente_financiamiento: Option<String>,
        #[serde(rename = "tipoBecario")]
        tipo_becario: Option<String>,
    },
    Investigador {
        #[serde(rename = "categoriaUTN")]
        categoria_utn: Option<String>,
        #[serde(rename = "programaDeIncentivos")]
        programa_de_incentivos: Option<String>,
        dedicacion: Option<String>,
        #[serde(rename = "gradoAcademico")]
        grado_academico: Option<String>,
    },
    Personal {
        #[serde(rename = "tipoPersonal")]
        tipo_personal: Option<String>,
    },
    IntegranteConsejoEducativo {
        cargo: Option<String>,
    },
}

impl DetallePersona {
    pub fn tipo(&self) -> TipoPersona {
        match self {
            DetallePersona::Becario { .. } => TipoPersona::Becario,
            DetallePersona::Investigador { .. } => TipoPersona::Investigador,
            DetallePersona::Personal { .. } => TipoPersona::Personal,
            DetallePersona::IntegranteConsejoEducativo { .. } => {
                TipoPersona::IntegranteConsejoEducativo
            }
        }
    }
}

/// Forme brute d'une personne telle que renvoyée par les listes. Selon la
/// variante, l'identifiant arrive sous `oidPersona` ou `oid{Variante}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaWire {
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_persona: Option<Oid>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_becario: Option<Oid>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_investigador: Option<Oid>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_personal: Option<Oid>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_integrante_consejo_educativo: Option<Oid>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_f64")]
    pub horas_semanales: Option<f64>,
    #[serde(default, deserialize_with = "super::de::lenient_opt_oid")]
    pub oid_grupo: Option<Oid>,
    #[serde(default)]
    pub nombre_grupo: Option<String>,
    #[serde(default)]
    pub tipo_persona: Option<String>,
    #[serde(default)]
    pub fuente_financiamiento: Option<String>,
    #[serde(default)]
    pub tipo_becario: Option<String>,
    #[serde(default, rename = "categoriaUTN")]
    pub categoria_utn: Option<String>,
    #[serde(default)]
    pub programa_de_incentivos: Option<String>,
    #[serde(default)]
    pub dedicacion: Option<String>,
    #[serde(default)]
    pub grado_academico: Option<String>,
    #[serde(default)]
    pub tipo_personal: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Persona {
    pub oid_persona: Oid,
    pub nombre: String,
    pub apellido: String,
    pub horas_semanales: Option<f64>,
    pub oid_grupo: Option<Oid>,
    pub nombre_grupo: Option<String>,
    pub detalle: DetallePersona,
}

impl PersonaWire {
    pub fn oid(&self) -> Option<Oid> {
        self.oid_persona
            .or(self.oid_becario)
            .or(self.oid_investigador)
            .or(self.oid_personal)
            .or(self.oid_integrante_consejo_educativo)
    }
}

impl Persona {
    /// `tipoPersona` du corps prime ; sinon la variante de l'endpoint.
    pub fn from_wire(wire: PersonaWire, por_defecto: TipoPersona) -> Persona {
        let oid = wire.oid().unwrap_or_default();
        let tipo = wire
            .tipo_persona
            .as_deref()
            .and_then(TipoPersona::parse)
            .unwrap_or(por_defecto);

        let detalle = match tipo {
            TipoPersona::Becario => DetallePersona::Becario {
                fuente_financiamiento: wire.fuente_financiamiento,
                tipo_becario: wire.tipo_becario,
            },
            TipoPersona::Investigador => DetallePersona::Investigador {
                categoria_utn: wire.categoria_utn,
                programa_de_incentivos: wire.programa_de_incentivos,
                dedicacion: wire.dedicacion,
                grado_academico: wire.grado_academico,
            },
            TipoPersona::Personal => DetallePersona::Personal {
                tipo_personal: wire.tipo_personal,
            },
            TipoPersona::IntegranteConsejoEducativo => {
                DetallePersona::IntegranteConsejoEducativo { cargo: wire.cargo }
            }
        };

        Persona {
            oid_persona: oid,
            nombre: wire.nombre.unwrap_or_default(),
            apellido: wire.apellido.unwrap_or_default(),
            horas_semanales: wire.horas_semanales,
            oid_grupo: wire.oid_grupo,
            nombre_grupo: wire.nombre_grupo,
            detalle,
        }
    }

    pub fn tipo(&self) -> TipoPersona {
        self.detalle.tipo()
    }

    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }

    pub fn resumen(&self) -> PersonaResumen {
        PersonaResumen {
            oid_persona: self.oid_persona,
            nombre: self.nombre.clone(),
            apellido: self.apellido.clone(),
            tipo_persona: Some(self.tipo().as_str().to_string()),
        }
    }
}

impl Keyed for Persona {
    fn key(&self) -> Oid {
        self.oid_persona
    }
}

impl Filtrable for Persona {
    fn campos_busqueda(&self) -> Vec<String> {
        vec![self.nombre.clone(), self.apellido.clone()]
    }
}

/// Corps JSON des écritures : tronc commun + champs de la variante.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaPayload {
    pub nombre: String,
    pub apellido: String,
    pub horas_semanales: f64,
    #[serde(flatten)]
    pub detalle: DetallePersona,
}

/// Vue courte d'une personne rattachée à une mémoire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaResumen {
    #[serde(default, deserialize_with = "super::de::lenient_oid")]
    pub oid_persona: Oid,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub tipo_persona: Option<String>,
}

impl Keyed for PersonaResumen {
    fn key(&self) -> Oid {
        self.oid_persona
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn untagged_listing_takes_endpoint_variant() {
        let wire: PersonaWire = serde_json::from_value(json!({
            "oidPersona": 4,
            "nombre": "Ana",
            "apellido": "Paz",
            "horasSemanales": "20",
            "tipoBecario": "Doctorado"
        }))
        .unwrap();

        let p = Persona::from_wire(wire, TipoPersona::Becario);
        assert_eq!(p.tipo(), TipoPersona::Becario);
        assert_eq!(p.horas_semanales, Some(20.0));
        assert_eq!(
            p.detalle,
            DetallePersona::Becario {
                fuente_financiamiento: None,
                tipo_becario: Some("Doctorado".into()),
            }
        );
    }

    #[test]
    fn explicit_tag_overrides_default_and_accepts_short_form() {
        let wire: PersonaWire =
            serde_json::from_value(json!({"oidInvestigador": 2, "tipoPersona": "IntegranteCE", "cargo": "Vocal"}))
                .unwrap();
        let p = Persona::from_wire(wire, TipoPersona::Becario);
        assert_eq!(p.oid_persona, 2);
        assert_eq!(p.tipo(), TipoPersona::IntegranteConsejoEducativo);
    }

    #[test]
    fn payload_carries_tag_and_variant_fields() {
        let payload = PersonaPayload {
            nombre: "Luis".into(),
            apellido: "Gómez".into(),
            horas_semanales: 10.0,
            detalle: DetallePersona::Investigador {
                categoria_utn: Some("A".into()),
                programa_de_incentivos: None,
                dedicacion: Some("Exclusiva".into()),
                grado_academico: None,
            },
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["tipoPersona"], "Investigador");
        assert_eq!(v["categoriaUTN"], "A");
        assert_eq!(v["horasSemanales"], 10.0);
        assert!(v.get("tipoBecario").is_none());
    }

    #[test]
    fn unknown_tipo_becario_is_shown_raw() {
        assert_eq!(TipoBecario::formatear(Some("Pasante")), "Pasante");
        assert_eq!(
            TipoBecario::formatear(Some("MaestriaYOEspecializacion")),
            "Maestría o Especialización"
        );
        assert_eq!(TipoBecario::formatear(Some("Otro")), "Otro");
        assert_eq!(TipoBecario::formatear(None), "-");
    }
}
