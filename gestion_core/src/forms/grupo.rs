use serde::Serialize;

use super::{email_valido, no_vacio};
use crate::error::FieldErrors;
use crate::models::{Grupo, Keyed, Persona};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrupoForm {
    pub nombre_grupo: String,
    pub sigla: String,
    pub email: String,
    /// `oidPersona` choisi, en texte.
    pub director: String,
    pub vice_director: String,
    pub objetivos: String,
    pub organigrama: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrupoPayload {
    pub nombre_grupo: String,
    pub sigla: String,
    pub email: String,
    pub director: Option<String>,
    pub vice_director: Option<String>,
    pub objetivos: Option<String>,
    pub organigrama: Option<String>,
}

impl GrupoForm {
    pub fn desde(grupo: Option<&Grupo>) -> Self {
        let Some(g) = grupo else {
            return Self::default();
        };
        Self {
            nombre_grupo: g.nombre_grupo.clone(),
            sigla: g.sigla.clone(),
            email: g.email.clone(),
            director: g.director.clone().unwrap_or_default(),
            vice_director: g.vice_director.clone().unwrap_or_default(),
            objetivos: g.objetivos.clone().unwrap_or_default(),
            organigrama: g.organigrama.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, campo: &str, valor: String) {
        match campo {
            "nombreGrupo" => self.nombre_grupo = valor,
            "sigla" => self.sigla = valor,
            "email" => self.email = valor,
            "director" => self.director = valor,
            "viceDirector" => self.vice_director = valor,
            "objetivos" => self.objetivos = valor,
            "organigrama" => self.organigrama = valor,
            _ => {}
        }
    }

    pub fn get(&self, campo: &str) -> &str {
        match campo {
            "nombreGrupo" => &self.nombre_grupo,
            "sigla" => &self.sigla,
            "email" => &self.email,
            "director" => &self.director,
            "viceDirector" => &self.vice_director,
            "objetivos" => &self.objetivos,
            "organigrama" => &self.organigrama,
            _ => "",
        }
    }

    pub const CAMPOS: [&'static str; 7] = [
        "nombreGrupo",
        "sigla",
        "email",
        "director",
        "viceDirector",
        "objetivos",
        "organigrama",
    ];

    /// Champs modifiés par rapport à la valeur chargée (mode édition).
    pub fn modificados(&self, original: &GrupoForm) -> Vec<&'static str> {
        Self::CAMPOS
            .into_iter()
            .filter(|c| self.get(c) != original.get(c))
            .collect()
    }

    pub fn validar(&self) -> Result<GrupoPayload, FieldErrors> {
        let mut errores = FieldErrors::new();

        if self.nombre_grupo.trim().is_empty() {
            errores.add("nombreGrupo", "El nombre del grupo es requerido");
        }
        if self.sigla.trim().is_empty() {
            errores.add("sigla", "La sigla de la facultad es requerida");
        }
        if self.email.trim().is_empty() {
            errores.add("email", "El email es requerido");
        } else if !email_valido(self.email.trim()) {
            errores.add("email", "El email no tiene un formato válido");
        }
        if !self.director.is_empty() && self.director == self.vice_director {
            errores.add(
                "viceDirector",
                "El vice-director no puede ser la misma persona que el director",
            );
        }
        errores.into_result()?;

        Ok(GrupoPayload {
            nombre_grupo: self.nombre_grupo.trim().to_string(),
            sigla: self.sigla.trim().to_string(),
            email: self.email.trim().to_string(),
            director: no_vacio(&self.director),
            vice_director: no_vacio(&self.vice_director),
            objetivos: no_vacio(&self.objetivos),
            organigrama: no_vacio(&self.organigrama),
        })
    }

    /// Candidats au poste de directeur : tous sauf le vice-directeur choisi.
    pub fn opciones_director<'a>(&self, personas: &'a [Persona]) -> Vec<&'a Persona> {
        excluir(personas, &self.vice_director)
    }

    pub fn opciones_vice<'a>(&self, personas: &'a [Persona]) -> Vec<&'a Persona> {
        excluir(personas, &self.director)
    }
}

fn excluir<'a>(personas: &'a [Persona], elegido: &str) -> Vec<&'a Persona> {
    personas
        .iter()
        .filter(|p| p.key().to_string() != elegido)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoPersona;

    fn valido() -> GrupoForm {
        GrupoForm {
            nombre_grupo: "Sistemas Inteligentes".into(),
            sigla: "GISI".into(),
            email: "gisi@utn.edu.ar".into(),
            ..Default::default()
        }
    }

    #[test]
    fn required_fields_are_reported() {
        let errores = GrupoForm::default().validar().unwrap_err();
        assert!(errores.contains("nombreGrupo"));
        assert!(errores.contains("sigla"));
        assert_eq!(errores.get("email"), Some("El email es requerido"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = GrupoForm { email: "gisi@utn".into(), ..valido() };
        let errores = form.validar().unwrap_err();
        assert_eq!(errores.get("email"), Some("El email no tiene un formato válido"));
    }

    #[test]
    fn director_and_vice_must_differ() {
        let form = GrupoForm { director: "5".into(), vice_director: "5".into(), ..valido() };
        assert!(form.validar().unwrap_err().contains("viceDirector"));

        let ok = GrupoForm { director: "5".into(), vice_director: "6".into(), ..valido() };
        let payload = ok.validar().unwrap();
        assert_eq!(payload.director.as_deref(), Some("5"));
        assert_eq!(payload.objetivos, None);
    }

    #[test]
    fn selects_exclude_each_other() {
        let personas: Vec<Persona> = (1..=3)
            .map(|i| Persona {
                oid_persona: i,
                nombre: format!("P{i}"),
                apellido: String::new(),
                horas_semanales: None,
                oid_grupo: None,
                nombre_grupo: None,
                detalle: TipoPersona::Investigador.detalle_vacio(),
            })
            .collect();

        let form = GrupoForm { director: "1".into(), vice_director: "2".into(), ..valido() };
        let directores: Vec<i64> = form.opciones_director(&personas).iter().map(|p| p.key()).collect();
        let vices: Vec<i64> = form.opciones_vice(&personas).iter().map(|p| p.key()).collect();
        assert_eq!(directores, vec![1, 3]);
        assert_eq!(vices, vec![2, 3]);
    }

    #[test]
    fn changed_fields_are_tracked() {
        let original = valido();
        let mut editado = original.clone();
        editado.set("sigla", "GISI-2".into());
        assert_eq!(editado.modificados(&original), vec!["sigla"]);
    }
}
