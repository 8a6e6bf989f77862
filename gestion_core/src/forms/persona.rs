//! Formulaire unique pour les quatre variantes de personne : le tronc commun
//! est partagé, les champs propres vivent dans [`DetallePersona`].

use super::{no_vacio, parse_numero, FormContext, FormMode};
use crate::error::FieldErrors;
use crate::models::{DetallePersona, Persona, PersonaPayload, TipoPersona};
use crate::Oid;

#[derive(Clone, Debug, PartialEq)]
pub struct PersonaForm {
    pub nombre: String,
    pub apellido: String,
    pub horas_semanales: String,
    pub oid_grupo: String,
    pub detalle: DetallePersona,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonaEnvio {
    pub payload: PersonaPayload,
    pub grupo: Option<Oid>,
}

impl PersonaForm {
    pub fn nueva(tipo: TipoPersona) -> Self {
        Self {
            nombre: String::new(),
            apellido: String::new(),
            horas_semanales: String::new(),
            oid_grupo: String::new(),
            detalle: tipo.detalle_vacio(),
        }
    }

    pub fn desde(persona: Option<&Persona>, tipo: TipoPersona) -> Self {
        match persona {
            None => Self::nueva(tipo),
            Some(p) => Self {
                nombre: p.nombre.clone(),
                apellido: p.apellido.clone(),
                horas_semanales: p.horas_semanales.map(|h| h.to_string()).unwrap_or_default(),
                oid_grupo: p.oid_grupo.map(|g| g.to_string()).unwrap_or_default(),
                detalle: p.detalle.clone(),
            },
        }
    }

    pub fn tipo(&self) -> TipoPersona {
        self.detalle.tipo()
    }

    /// Change de variante en gardant le tronc commun.
    pub fn cambiar_tipo(&mut self, tipo: TipoPersona) {
        if self.tipo() != tipo {
            self.detalle = tipo.detalle_vacio();
        }
    }

    pub fn get(&self, campo: &str) -> &str {
        match campo {
            "nombre" => &self.nombre,
            "apellido" => &self.apellido,
            "horasSemanales" => &self.horas_semanales,
            "oidGrupo" => &self.oid_grupo,
            _ => self.detalle_campo(campo).map_or("", |v| v.as_deref().unwrap_or("")),
        }
    }

    pub fn set(&mut self, campo: &str, valor: String) {
        match campo {
            "nombre" => self.nombre = valor,
            "apellido" => self.apellido = valor,
            "horasSemanales" => self.horas_semanales = valor,
            "oidGrupo" => self.oid_grupo = valor,
            _ => {
                if let Some(slot) = self.detalle_campo_mut(campo) {
                    *slot = Some(valor);
                }
            }
        }
    }

    fn detalle_campo(&self, campo: &str) -> Option<&Option<String>> {
        match (&self.detalle, campo) {
            (DetallePersona::Becario { fuente_financiamiento, .. }, "fuenteFinanciamiento") => {
                Some(fuente_financiamiento)
            }
            (DetallePersona::Becario { tipo_becario, .. }, "tipoBecario") => Some(tipo_becario),
            (DetallePersona::Investigador { categoria_utn, .. }, "categoriaUTN") => Some(categoria_utn),
            (DetallePersona::Investigador { programa_de_incentivos, .. }, "programaDeIncentivos") => {
                Some(programa_de_incentivos)
            }
            (DetallePersona::Investigador { dedicacion, .. }, "dedicacion") => Some(dedicacion),
            (DetallePersona::Investigador { grado_academico, .. }, "gradoAcademico") => {
                Some(grado_academico)
            }
            (DetallePersona::Personal { tipo_personal }, "tipoPersonal") => Some(tipo_personal),
            (DetallePersona::IntegranteConsejoEducativo { cargo }, "cargo") => Some(cargo),
            _ => None,
        }
    }

    fn detalle_campo_mut(&mut self, campo: &str) -> Option<&mut Option<String>> {
        match (&mut self.detalle, campo) {
            (DetallePersona::Becario { fuente_financiamiento, .. }, "fuenteFinanciamiento") => {
                Some(fuente_financiamiento)
            }
            (DetallePersona::Becario { tipo_becario, .. }, "tipoBecario") => Some(tipo_becario),
            (DetallePersona::Investigador { categoria_utn, .. }, "categoriaUTN") => Some(categoria_utn),
            (DetallePersona::Investigador { programa_de_incentivos, .. }, "programaDeIncentivos") => {
                Some(programa_de_incentivos)
            }
            (DetallePersona::Investigador { dedicacion, .. }, "dedicacion") => Some(dedicacion),
            (DetallePersona::Investigador { grado_academico, .. }, "gradoAcademico") => {
                Some(grado_academico)
            }
            (DetallePersona::Personal { tipo_personal }, "tipoPersonal") => Some(tipo_personal),
            (DetallePersona::IntegranteConsejoEducativo { cargo }, "cargo") => Some(cargo),
            _ => None,
        }
    }

    fn detalle_normalizado(&self) -> DetallePersona {
        let n = |v: &Option<String>| v.as_deref().and_then(no_vacio);
        match &self.detalle {
            DetallePersona::Becario { fuente_financiamiento, tipo_becario } => DetallePersona::Becario {
                fuente_financiamiento: n(fuente_financiamiento),
                tipo_becario: n(tipo_becario),
            },
            DetallePersona::Investigador {
                categoria_utn,
                programa_de_incentivos,
                dedicacion,
                grado_academico,
            } => DetallePersona::Investigador {
                categoria_utn: n(categoria_utn),
                programa_de_incentivos: n(programa_de_incentivos),
                dedicacion: n(dedicacion),
                grado_academico: n(grado_academico),
            },
            DetallePersona::Personal { tipo_personal } => DetallePersona::Personal {
                tipo_personal: n(tipo_personal),
            },
            DetallePersona::IntegranteConsejoEducativo { cargo } => {
                DetallePersona::IntegranteConsejoEducativo { cargo: n(cargo) }
            }
        }
    }

    /// Les heures vides valent 0, comme un champ numérique non rempli.
    pub fn validar(&self, ctx: &FormContext, modo: FormMode) -> Result<PersonaEnvio, FieldErrors> {
        let mut errores = FieldErrors::new();

        let grupo = ctx.grupo_destino(&self.oid_grupo);
        if modo == FormMode::Crear && ctx.es_admin() && grupo.is_none() {
            errores.add("oidGrupo", "Debe seleccionar un grupo");
        }

        let horas = match parse_numero(&self.horas_semanales) {
            Ok(Some(h)) if h < 0.0 => {
                errores.add("horasSemanales", "Las horas no pueden ser negativas");
                0.0
            }
            Ok(h) => h.unwrap_or(0.0),
            Err(()) => {
                errores.add("horasSemanales", "Las horas semanales deben ser numéricas");
                0.0
            }
        };
        errores.into_result()?;

        Ok(PersonaEnvio {
            payload: PersonaPayload {
                nombre: self.nombre.trim().to_string(),
                apellido: self.apellido.trim().to_string(),
                horas_semanales: horas,
                detalle: self.detalle_normalizado(),
            },
            grupo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn ctx(role: Role) -> FormContext {
        FormContext { role, grupo_usuario: Some(4), anio_actual: 2025 }
    }

    #[test]
    fn admin_becario_without_group_is_rejected() {
        let mut form = PersonaForm::nueva(TipoPersona::Becario);
        form.set("nombre", "Ana".into());
        let errores = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap_err();
        assert_eq!(errores.get("oidGrupo"), Some("Debe seleccionar un grupo"));
    }

    #[test]
    fn variant_fields_are_routed_by_kind() {
        let mut form = PersonaForm::nueva(TipoPersona::Personal);
        form.set("tipoPersonal", "PersonalProfesional".into());
        form.set("cargo", "ignorado".into());
        assert_eq!(form.get("tipoPersonal"), "PersonalProfesional");
        assert_eq!(form.get("cargo"), "");

        form.cambiar_tipo(TipoPersona::IntegranteConsejoEducativo);
        form.set("cargo", "Vocal".into());
        assert_eq!(form.tipo(), TipoPersona::IntegranteConsejoEducativo);
        assert_eq!(form.get("cargo"), "Vocal");
    }

    #[test]
    fn payload_coerces_hours_and_blanks() {
        let mut form = PersonaForm::nueva(TipoPersona::Becario);
        form.set("nombre", " Ana ".into());
        form.set("apellido", "Paz".into());
        form.set("horasSemanales", "20".into());
        form.set("fuenteFinanciamiento", "  ".into());
        form.set("tipoBecario", "Doctorado".into());

        let envio = form.validar(&ctx(Role::Director), FormMode::Crear).unwrap();
        assert_eq!(envio.grupo, Some(4));
        assert_eq!(envio.payload.nombre, "Ana");
        assert_eq!(envio.payload.horas_semanales, 20.0);
        assert_eq!(
            envio.payload.detalle,
            DetallePersona::Becario {
                fuente_financiamiento: None,
                tipo_becario: Some("Doctorado".into()),
            }
        );
    }

    #[test]
    fn non_numeric_hours() {
        let mut form = PersonaForm::nueva(TipoPersona::Investigador);
        form.set("horasSemanales", "muchas".into());
        let errores = form.validar(&ctx(Role::Director), FormMode::Editar).unwrap_err();
        assert!(errores.contains("horasSemanales"));
    }
}
