use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Erreurs de validation, indexées par nom de champ (clé camelCase du formulaire).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` si aucune erreur n'a été enregistrée.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", joined.join(" / "))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// La requête n'a jamais obtenu de réponse.
    #[error("Error de conexión con el servidor: {0}")]
    Network(String),

    /// Réponse hors 2xx ; `message` est déjà extrait du corps.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("Operación no disponible para este rol: {entidad} / {operacion}")]
    MissingEndpoint {
        entidad: &'static str,
        operacion: &'static str,
    },

    #[error("Debe seleccionar un grupo")]
    MissingGroup,

    #[error("El documento no tiene archivo asociado")]
    EmptyFile,

    #[error("{0}")]
    Validation(FieldErrors),
}

impl ApiError {
    /// Construit l'erreur HTTP à partir du corps brut : champ `message` du JSON
    /// s'il existe, sinon le texte, sinon le code.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).trim().to_string();

        let message = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => match map.get("message") {
                Some(Value::String(m)) if !m.is_empty() => m.clone(),
                _ => text.clone(),
            },
            _ => text.clone(),
        };

        let message = if message.is_empty() {
            format!("Error HTTP {status}")
        } else {
            message
        };

        ApiError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins_over_raw_body() {
        let err = ApiError::from_response(400, br#"{"message":"Grupo duplicado","code":7}"#);
        assert_eq!(err.to_string(), "Grupo duplicado");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn plain_text_body_is_kept_verbatim() {
        let err = ApiError::from_response(500, b"La sigla ya existe");
        assert_eq!(
            err,
            ApiError::Http { status: 500, message: "La sigla ya existe".into() }
        );
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = ApiError::from_response(403, b"");
        assert_eq!(err.to_string(), "Error HTTP 403");
    }

    #[test]
    fn field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("email", "El email es obligatorio");
        errors.add("email", "Email inválido");
        assert_eq!(errors.get("email"), Some("El email es obligatorio"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
    }
}
