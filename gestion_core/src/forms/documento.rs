use serde_json::{json, Value};

use super::{no_vacio, FormContext, FormMode};
use crate::error::FieldErrors;
use crate::http::Archivo;
use crate::models::Documento;
use crate::Oid;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentoForm {
    pub titulo: String,
    pub autores: String,
    pub editorial: String,
    pub anio: String,
    pub oid_grupo: String,
    pub archivo: Option<Archivo>,
}

/// Prêt pour l'envoi multipart.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentoEnvio {
    pub documento: Value,
    pub archivo: Option<Archivo>,
    pub grupo: Option<Oid>,
}

impl DocumentoForm {
    pub fn desde(documento: Option<&Documento>, ctx: &FormContext) -> Self {
        let grupo_propio = ctx.grupo_usuario.map(|g| g.to_string()).unwrap_or_default();
        let Some(d) = documento else {
            return Self {
                oid_grupo: if ctx.es_admin() { String::new() } else { grupo_propio },
                ..Self::default()
            };
        };

        Self {
            titulo: d.titulo.clone(),
            autores: d.autores.clone().unwrap_or_default(),
            editorial: d.editorial.clone().unwrap_or_default(),
            anio: d.anio.map(|a| a.to_string()).unwrap_or_default(),
            oid_grupo: if ctx.es_admin() {
                d.grupo_id().map(|g| g.to_string()).unwrap_or_default()
            } else {
                grupo_propio
            },
            archivo: None,
        }
    }

    pub fn validar(&self, ctx: &FormContext, modo: FormMode) -> Result<DocumentoEnvio, FieldErrors> {
        let mut errores = FieldErrors::new();

        if self.titulo.trim().is_empty() {
            errores.add("titulo", "El título es obligatorio");
        }

        let grupo = ctx.grupo_destino(&self.oid_grupo);
        if modo == FormMode::Crear {
            if self.archivo.is_none() {
                errores.add("archivo", "Debe adjuntar un archivo");
            }
            if grupo.is_none() {
                errores.add("oidGrupo", "Debe seleccionar un grupo");
            }
        }

        let anio = match self.anio.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(a) if a <= ctx.anio_actual => Some(a),
                _ => {
                    errores.add(
                        "anio",
                        format!("El año no puede ser mayor a {}", ctx.anio_actual),
                    );
                    None
                }
            },
        };
        errores.into_result()?;

        let mut documento = json!({
            "titulo": self.titulo.trim(),
            "autores": no_vacio(&self.autores),
            "editorial": no_vacio(&self.editorial),
            "anio": anio,
        });
        // L'URL de création porte déjà le groupe.
        if modo == FormMode::Editar {
            documento["oidGrupo"] = json!(grupo);
        }

        Ok(DocumentoEnvio {
            documento,
            archivo: self.archivo.clone(),
            grupo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn ctx(role: Role) -> FormContext {
        FormContext { role, grupo_usuario: Some(9), anio_actual: 2025 }
    }

    fn archivo() -> Archivo {
        Archivo {
            nombre: "acta.pdf".into(),
            tipo_mime: "application/pdf".into(),
            contenido: vec![37, 80, 68, 70],
        }
    }

    #[test]
    fn create_requires_title_and_file() {
        let errores = DocumentoForm::default()
            .validar(&ctx(Role::Director), FormMode::Crear)
            .unwrap_err();
        assert!(errores.contains("titulo"));
        assert!(errores.contains("archivo"));
        assert!(!errores.contains("oidGrupo"));
    }

    #[test]
    fn edit_does_not_require_file() {
        let form = DocumentoForm { titulo: "Informe".into(), ..Default::default() };
        let envio = form.validar(&ctx(Role::Director), FormMode::Editar).unwrap();
        assert_eq!(envio.archivo, None);
        assert_eq!(envio.documento["oidGrupo"], 9);
    }

    #[test]
    fn future_year_is_rejected() {
        let form = DocumentoForm {
            titulo: "Informe".into(),
            anio: "2031".into(),
            archivo: Some(archivo()),
            oid_grupo: "1".into(),
            ..Default::default()
        };
        let errores = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap_err();
        assert_eq!(errores.get("anio"), Some("El año no puede ser mayor a 2025"));
    }

    #[test]
    fn admin_create_strips_group_from_body() {
        let form = DocumentoForm {
            titulo: "Paper".into(),
            anio: "2024".into(),
            oid_grupo: "3".into(),
            archivo: Some(archivo()),
            ..Default::default()
        };
        let envio = form.validar(&ctx(Role::Administrador), FormMode::Crear).unwrap();
        assert_eq!(envio.grupo, Some(3));
        assert_eq!(envio.documento["anio"], 2024);
        assert!(envio.documento.get("oidGrupo").is_none());
    }
}
