use serde::Serialize;

use super::{no_vacio, parse_numero, FormContext, FormMode};
use crate::error::FieldErrors;
use crate::models::Equipo;
use crate::Oid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipoForm {
    pub denominacion: String,
    pub descripcion: String,
    pub fecha_incorporacion: String,
    pub monto_invertido: String,
    pub oid_grupo: String,
    pub activo: bool,
}

impl Default for EquipoForm {
    fn default() -> Self {
        Self {
            denominacion: String::new(),
            descripcion: String::new(),
            fecha_incorporacion: String::new(),
            monto_invertido: String::new(),
            oid_grupo: String::new(),
            activo: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipoPayload {
    pub denominacion: String,
    pub descripcion: Option<String>,
    pub fecha_incorporacion: Option<String>,
    pub monto_invertido: Option<f64>,
    /// Envoyé seulement en édition ; à la création l'URL porte le groupe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid_grupo: Option<Oid>,
    pub activo: bool,
    /// Groupe cible de la création.
    #[serde(skip)]
    pub grupo: Option<Oid>,
}

impl EquipoForm {
    /// Hors administrateur, le groupe est toujours celui de la session.
    pub fn desde(equipo: Option<&Equipo>, ctx: &FormContext) -> Self {
        let grupo_propio = ctx.grupo_usuario.map(|g| g.to_string()).unwrap_or_default();
        let Some(e) = equipo else {
            return Self {
                oid_grupo: if ctx.es_admin() { String::new() } else { grupo_propio },
                ..Self::default()
            };
        };

        Self {
            denominacion: e.denominacion.clone(),
            descripcion: e.descripcion.clone().unwrap_or_default(),
            fecha_incorporacion: e.fecha_incorporacion.clone().unwrap_or_default(),
            monto_invertido: e.monto_invertido.map(|m| m.to_string()).unwrap_or_default(),
            oid_grupo: if ctx.es_admin() {
                e.grupo_id().map(|g| g.to_string()).unwrap_or_default()
            } else {
                grupo_propio
            },
            activo: e.activo,
        }
    }

    pub fn validar(&self, ctx: &FormContext, modo: FormMode) -> Result<EquipoPayload, FieldErrors> {
        let mut errores = FieldErrors::new();

        if self.denominacion.trim().is_empty() {
            errores.add("denominacion", "La denominación es obligatoria");
        }
        let grupo = ctx.grupo_destino(&self.oid_grupo);
        if ctx.es_admin() && grupo.is_none() {
            errores.add("oidGrupo", "Debe seleccionar un grupo");
        }
        let monto = match parse_numero(&self.monto_invertido) {
            Ok(Some(m)) if m < 0.0 => {
                errores.add("montoInvertido", "El monto no puede ser negativo");
                None
            }
            Ok(m) => m,
            Err(()) => {
                errores.add("montoInvertido", "El monto debe ser numérico");
                None
            }
        };
        errores.into_result()?;

        Ok(EquipoPayload {
            denominacion: self.denominacion.trim().to_string(),
            descripcion: no_vacio(&self.descripcion),
            fecha_incorporacion: no_vacio(&self.fecha_incorporacion),
            monto_invertido: monto,
            oid_grupo: if modo == FormMode::Editar { grupo } else { None },
            activo: self.activo,
            grupo,
        })
    }

    pub fn modificados(&self, original: &EquipoForm) -> Vec<&'static str> {
        let mut campos = Vec::new();
        if self.denominacion != original.denominacion {
            campos.push("denominacion");
        }
        if self.descripcion != original.descripcion {
            campos.push("descripcion");
        }
        if self.fecha_incorporacion != original.fecha_incorporacion {
            campos.push("fechaIncorporacion");
        }
        if self.monto_invertido != original.monto_invertido {
            campos.push("montoInvertido");
        }
        if self.oid_grupo != original.oid_grupo {
            campos.push("oidGrupo");
        }
        if self.activo != original.activo {
            campos.push("activo");
        }
        campos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn ctx(role: Role) -> FormContext {
        FormContext { role, grupo_usuario: Some(2), anio_actual: 2025 }
    }

    #[test]
    fn admin_must_pick_group() {
        let form = EquipoForm { denominacion: "Osciloscopio".into(), ..Default::default() };
        let errores = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap_err();
        assert_eq!(errores.get("oidGrupo"), Some("Debe seleccionar un grupo"));
    }

    #[test]
    fn director_uses_session_group() {
        let form = EquipoForm::desde(None, &ctx(Role::Director));
        assert_eq!(form.oid_grupo, "2");
        let form = EquipoForm { denominacion: "Router".into(), monto_invertido: "1500".into(), ..form };
        let payload = form.validar(&ctx(Role::Director), FormMode::Crear).unwrap();
        assert_eq!(payload.grupo, Some(2));
        assert_eq!(payload.monto_invertido, Some(1500.0));
        assert!(payload.activo);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let form = EquipoForm {
            denominacion: "PC".into(),
            monto_invertido: "-3".into(),
            oid_grupo: "1".into(),
            ..Default::default()
        };
        let errores = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap_err();
        assert_eq!(errores.get("montoInvertido"), Some("El monto no puede ser negativo"));
    }

    #[test]
    fn group_travels_in_body_only_when_editing() {
        let form = EquipoForm { denominacion: "Osciloscopio".into(), oid_grupo: "5".into(), ..Default::default() };

        let alta = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap();
        assert_eq!(alta.grupo, Some(5));
        let cuerpo = serde_json::to_value(&alta).unwrap();
        assert!(cuerpo.get("oidGrupo").is_none());
        assert!(cuerpo.get("grupo").is_none());

        let edicion = form.validar(&ctx(Role::Administrador), FormMode::Editar).unwrap();
        assert_eq!(serde_json::to_value(&edicion).unwrap()["oidGrupo"], 5);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let form = EquipoForm { denominacion: "PC".into(), monto_invertido: "NaN".into(), ..Default::default() };
        let errores = form.validar(&ctx(Role::Director), FormMode::Crear).unwrap_err();
        assert_eq!(errores.get("montoInvertido"), Some("El monto debe ser numérico"));
    }

    #[test]
    fn missing_denominacion() {
        let errores = EquipoForm::default().validar(&ctx(Role::Vicedirector), FormMode::Crear).unwrap_err();
        assert!(errores.contains("denominacion"));
        assert!(!errores.contains("oidGrupo"));
    }
}
