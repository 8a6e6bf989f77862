//! Messages modaux : succès, erreurs, avertissements et confirmations.

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipoAlerta {
    Exito,
    Error,
    Advertencia,
    Info,
}

impl TipoAlerta {
    pub fn clase(self) -> &'static str {
        match self {
            TipoAlerta::Exito => "exito",
            TipoAlerta::Error => "error",
            TipoAlerta::Advertencia => "advertencia",
            TipoAlerta::Info => "info",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TipoAlerta::Exito => "#2e7d32",
            TipoAlerta::Error => "#c62828",
            TipoAlerta::Advertencia => "#ef6c00",
            TipoAlerta::Info => "#1565c0",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alerta {
    pub tipo: TipoAlerta,
    pub titulo: String,
    pub mensaje: String,
}

impl Alerta {
    pub fn new(tipo: TipoAlerta, titulo: impl Into<String>, mensaje: impl Into<String>) -> Self {
        Self {
            tipo,
            titulo: titulo.into(),
            mensaje: mensaje.into(),
        }
    }

    pub fn exito(mensaje: impl Into<String>) -> Self {
        Self::new(TipoAlerta::Exito, "Éxito", mensaje)
    }

    pub fn error(mensaje: impl Into<String>) -> Self {
        Self::new(TipoAlerta::Error, "Error", mensaje)
    }

    /// Les pannes réseau sont un avertissement, le reste une erreur.
    pub fn desde_error(err: &ApiError) -> Self {
        match err {
            ApiError::Network(detalle) => Self::new(
                TipoAlerta::Advertencia,
                "Error de Conexión",
                format!("No se pudo conectar con el servidor. Error: {detalle}"),
            ),
            otro => Self::error(otro.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_are_warnings() {
        let alerta = Alerta::desde_error(&ApiError::Network("Failed to fetch".into()));
        assert_eq!(alerta.tipo, TipoAlerta::Advertencia);
        assert!(alerta.mensaje.ends_with("Failed to fetch"));

        let alerta = Alerta::desde_error(&ApiError::MissingGroup);
        assert_eq!(alerta.tipo, TipoAlerta::Error);
        assert_eq!(alerta.mensaje, "Debe seleccionar un grupo");
    }
}
