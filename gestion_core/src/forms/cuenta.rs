//! Comptes : connexion, inscription, création d'utilisateur par l'administrateur.

use serde::Serialize;

use super::{parse_oid, FormContext, FormMode, PersonaForm};
use crate::error::FieldErrors;
use crate::models::TipoPersona;
use crate::role::Role;

pub const PASSWORD_MIN: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validar(&self) -> Result<LoginForm, FieldErrors> {
        let mut errores = FieldErrors::new();
        if self.email.trim().is_empty() {
            errores.add("email", "El email es obligatorio");
        }
        if self.password.is_empty() {
            errores.add("password", "La contraseña es obligatoria");
        }
        errores.into_result()?;

        Ok(LoginForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

fn validar_password(errores: &mut FieldErrors, password: &str, confirmar: &str) {
    if password != confirmar {
        errores.add("confirmar", "Las contraseñas no coinciden");
    }
    if password.chars().count() < PASSWORD_MIN {
        errores.add(
            "password",
            format!("La contraseña debe tener al menos {PASSWORD_MIN} caracteres"),
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistroForm {
    pub email: String,
    pub password: String,
    pub confirmar: String,
}

impl RegistroForm {
    pub fn validar(&self) -> Result<LoginForm, FieldErrors> {
        let mut errores = FieldErrors::new();
        if self.email.trim().is_empty() {
            errores.add("email", "El email es obligatorio");
        }
        validar_password(&mut errores, &self.password, &self.confirmar);
        errores.into_result()?;

        Ok(LoginForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/* -------------------------------------------------------------------------- */
/*                 création d'un compte rattaché à une personne                */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct UsuarioForm {
    pub email: String,
    pub password: String,
    pub confirmar: String,
    pub role: Option<Role>,
    pub oid_grupo: String,
    pub tipo_persona: Option<TipoPersona>,
    pub persona: PersonaForm,
}

impl Default for UsuarioForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            confirmar: String::new(),
            role: None,
            oid_grupo: String::new(),
            tipo_persona: None,
            persona: PersonaForm::nueva(TipoPersona::Investigador),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsociarUsuario {
    pub oid_persona: i64,
    pub email: String,
    pub password: String,
    pub role: &'static str,
}

/// Données validées : la personne à créer puis le compte à lui associer.
#[derive(Clone, Debug, PartialEq)]
pub struct UsuarioEnvio {
    pub grupo: i64,
    pub persona: crate::models::PersonaPayload,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UsuarioForm {
    pub fn set_tipo(&mut self, tipo: Option<TipoPersona>) {
        self.tipo_persona = tipo;
        if let Some(t) = tipo {
            self.persona.cambiar_tipo(t);
        }
    }

    pub fn validar(&self, ctx: &FormContext) -> Result<UsuarioEnvio, FieldErrors> {
        let mut errores = FieldErrors::new();

        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            errores.add("email", "Email y contraseña son obligatorios");
        }
        if self.role.is_none() {
            errores.add("role", "Debe seleccionar un rol");
        }
        let grupo = parse_oid(&self.oid_grupo);
        if grupo.is_none() {
            errores.add("oidGrupo", "Debe seleccionar un grupo");
        }
        if self.tipo_persona.is_none() {
            errores.add("tipoPersona", "Debe seleccionar un tipo de persona");
        }
        validar_password(&mut errores, &self.password, &self.confirmar);

        let persona = match self.persona.validar(ctx, FormMode::Editar) {
            Ok(envio) => Some(envio.payload),
            Err(e) => {
                for (campo, mensaje) in e.iter() {
                    errores.add(campo, mensaje);
                }
                None
            }
        };
        errores.into_result()?;

        match (grupo, self.role, persona) {
            (Some(grupo), Some(role), Some(persona)) => Ok(UsuarioEnvio {
                grupo,
                persona,
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                role,
            }),
            _ => Err(FieldErrors::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> FormContext {
        FormContext { role: Role::Administrador, grupo_usuario: None, anio_actual: 2025 }
    }

    #[test]
    fn login_requires_both_fields() {
        let errores = LoginForm::default().validar().unwrap_err();
        assert!(errores.contains("email") && errores.contains("password"));
    }

    #[test]
    fn register_checks_passwords() {
        let form = RegistroForm {
            email: "x@y.com".into(),
            password: "abc".into(),
            confirmar: "abd".into(),
        };
        let errores = form.validar().unwrap_err();
        assert_eq!(errores.get("confirmar"), Some("Las contraseñas no coinciden"));
        assert_eq!(
            errores.get("password"),
            Some("La contraseña debe tener al menos 6 caracteres")
        );

        let ok = RegistroForm { password: "secreto".into(), confirmar: "secreto".into(), ..form };
        assert_eq!(ok.validar().unwrap().email, "x@y.com");
    }

    #[test]
    fn admin_user_creation_collects_every_missing_choice() {
        let errores = UsuarioForm::default().validar(&ctx()).unwrap_err();
        for campo in ["email", "role", "oidGrupo", "tipoPersona", "password"] {
            assert!(errores.contains(campo), "{campo}");
        }
    }

    #[test]
    fn admin_user_creation_builds_both_requests() {
        let mut form = UsuarioForm {
            email: "nuevo@utn.edu.ar".into(),
            password: "secreto1".into(),
            confirmar: "secreto1".into(),
            role: Some(Role::Integrante),
            oid_grupo: "2".into(),
            ..Default::default()
        };
        form.set_tipo(Some(TipoPersona::Personal));
        form.persona.set("nombre", "Eva".into());

        let envio = form.validar(&ctx()).unwrap();
        assert_eq!(envio.grupo, 2);
        assert_eq!(envio.role, Role::Integrante);
        assert_eq!(envio.persona.detalle.tipo(), TipoPersona::Personal);
    }
}
