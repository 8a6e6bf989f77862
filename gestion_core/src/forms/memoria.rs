use super::{parse_oid, FormContext};
use crate::error::FieldErrors;
use crate::Oid;

pub const ANIO_MIN: i32 = 2000;
pub const ANIO_MAX: i32 = 2100;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoriaForm {
    pub anio: String,
    pub oid_grupo: String,
}

impl MemoriaForm {
    pub fn nueva(anio_actual: i32) -> Self {
        Self {
            anio: anio_actual.to_string(),
            oid_grupo: String::new(),
        }
    }

    /// Renvoie `(année, groupe)` ; le groupe n'est exigé que de l'administrateur.
    pub fn validar(&self, ctx: &FormContext) -> Result<(i32, Option<Oid>), FieldErrors> {
        let mut errores = FieldErrors::new();

        let anio = self.anio.trim().parse::<i32>().ok();
        match anio {
            Some(a) if (ANIO_MIN..=ANIO_MAX).contains(&a) => {}
            _ => errores.add("anio", format!("El año debe estar entre {ANIO_MIN} y {ANIO_MAX}")),
        }

        let grupo = parse_oid(&self.oid_grupo);
        if ctx.es_admin() && grupo.is_none() {
            errores.add("oidGrupo", "Debe seleccionar un grupo");
        }
        errores.into_result()?;

        Ok((anio.unwrap_or(ANIO_MIN), if ctx.es_admin() { grupo } else { None }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn defaults_to_current_year() {
        assert_eq!(MemoriaForm::nueva(2025).anio, "2025");
    }

    #[test]
    fn year_bounds_and_admin_group() {
        let admin = FormContext { role: Role::Administrador, grupo_usuario: None, anio_actual: 2025 };
        let errores = MemoriaForm { anio: "1999".into(), oid_grupo: String::new() }
            .validar(&admin)
            .unwrap_err();
        assert!(errores.contains("anio"));
        assert!(errores.contains("oidGrupo"));

        let ok = MemoriaForm { anio: "2024".into(), oid_grupo: "5".into() }.validar(&admin);
        assert_eq!(ok, Ok((2024, Some(5))));

        let director = FormContext { role: Role::Director, ..admin };
        let ok = MemoriaForm { anio: "2024".into(), oid_grupo: "5".into() }.validar(&director);
        assert_eq!(ok, Ok((2024, None)));
    }
}
