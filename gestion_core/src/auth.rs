//! Connexion, inscription et création de comptes par l'administrateur.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::forms::cuenta::{AsociarUsuario, LoginForm, UsuarioEnvio};
use crate::http::{ApiClient, ApiRequest, HttpBackend};
use crate::models::GrupoRef;
use crate::permissions::Entidad;
use crate::endpoints::resolve_endpoints;
use crate::role::Role;
use crate::session::Usuario;
use crate::Oid;

const ROL_POR_DEFECTO: &str = "INTEGRANTE";

#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    grupo: Option<GrupoRef>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct Credenciales<'a> {
    email: &'a str,
    password: &'a str,
}

fn auth_url(base: &str, accion: &str) -> String {
    format!("{}/auth/{accion}", base.trim_end_matches('/'))
}

/// Réponse 2xx avec jeton → session prête à être persistée. Tout le reste
/// donne le `message` du backend ou « Credenciales incorrectas ».
pub async fn login<B: HttpBackend>(
    backend: &B,
    base: &str,
    form: &LoginForm,
) -> Result<Usuario, ApiError> {
    let request = ApiRequest::post(auth_url(base, "login")).json(&Credenciales {
        email: &form.email,
        password: &form.password,
    })?;
    let response = backend.send(request).await?;

    let data: LoginResponse = response.json().unwrap_or_default();
    match data.token.filter(|t| !t.is_empty()) {
        Some(token) if response.is_success() => {
            info!("sesión iniciada para {}", form.email);
            Ok(Usuario {
                email: form.email.clone(),
                role: data.role.unwrap_or_else(|| ROL_POR_DEFECTO.to_string()),
                grupo: data.grupo,
                token,
                logged_in: true,
            })
        }
        _ => {
            warn!("login rechazado ({})", response.status);
            Err(ApiError::Http {
                status: response.status,
                message: data
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Credenciales incorrectas".to_string()),
            })
        }
    }
}

pub async fn register<B: HttpBackend>(
    backend: &B,
    base: &str,
    form: &LoginForm,
) -> Result<(), ApiError> {
    let request = ApiRequest::post(auth_url(base, "register")).json(&Credenciales {
        email: &form.email,
        password: &form.password,
    })?;
    let response = backend.send(request).await?;

    if response.is_success() {
        return Ok(());
    }
    let texto = response.text();
    Err(ApiError::Http {
        status: response.status,
        message: if texto.trim().is_empty() {
            "No se pudo registrar".to_string()
        } else {
            texto
        },
    })
}

/* -------------------------------------------------------------------------- */
/*                 administrador : personne puis compte associé                */
/* -------------------------------------------------------------------------- */

/// Le backend renvoie l'identifiant sous des formes variables.
pub fn extraer_oid_persona(data: &Value) -> Option<Oid> {
    let candidatos = [
        data.get("oidPersona"),
        data.get("id"),
        data.get("persona").and_then(|p| p.get("oidPersona")),
        data.get("data").and_then(|d| d.get("oidPersona")),
    ];
    candidatos.into_iter().flatten().find_map(|v| match v {
        Value::Number(n) => n.as_i64().filter(|&n| n != 0),
        Value::String(s) => s.trim().parse().ok().filter(|&n: &Oid| n != 0),
        _ => None,
    })
}

/// Renvoie le message de confirmation du backend.
pub async fn crear_usuario<B: HttpBackend>(
    client: &ApiClient<B>,
    base: &str,
    envio: &UsuarioEnvio,
) -> Result<String, ApiError> {
    let personas = resolve_endpoints(base, Role::Administrador.as_str(), Entidad::Becarios);
    let url = personas.crear(Some(envio.grupo))?;

    let creada = client.execute(ApiRequest::post(url).json(&envio.persona)?).await?;
    let texto = creada.text();
    let data: Value = if texto.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&texto).map_err(|_| {
            ApiError::Decode("La creación de persona no devolvió JSON válido".into())
        })?
    };
    let oid_persona = extraer_oid_persona(&data).ok_or_else(|| {
        ApiError::Decode("No se pudo obtener oidPersona de la persona creada".into())
    })?;

    let asociar = AsociarUsuario {
        oid_persona,
        email: envio.email.clone(),
        password: envio.password.clone(),
        role: envio.role.as_str(),
    };
    let url = format!("{}/administrador/usuarios/asociarUsuario", base.trim_end_matches('/'));
    let respuesta = client.execute(ApiRequest::post(url).json(&asociar)?).await?;

    info!("usuario {} asociado a la persona {oid_persona}", envio.email);
    let mensaje = respuesta.text();
    Ok(if mensaje.trim().is_empty() {
        "Usuario creado y asociado a persona correctamente".to_string()
    } else {
        mensaje
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::http::{ApiResponse, HttpMethod, RequestBody};
    use crate::models::{DetallePersona, PersonaPayload};
    use crate::test_utils::MemoryBackend;

    const BASE: &str = "http://api";

    fn credenciales() -> LoginForm {
        LoginForm { email: "dir@utn.edu.ar".into(), password: "secreto".into() }
    }

    #[test]
    fn login_builds_session_with_default_role() {
        let backend = MemoryBackend::new();
        backend.respond_json("http://api/auth/login", r#"{"token":"jwt","grupo":{"oidGrupo":5,"sigla":"GIS"}}"#);

        let usuario = block_on(login(&backend, BASE, &credenciales())).unwrap();
        assert_eq!(usuario.role, "INTEGRANTE");
        assert_eq!(usuario.grupo_id(), Some(5));
        assert!(usuario.is_authenticated());
        assert_eq!(
            backend.requests()[0].body,
            RequestBody::Json(json!({"email": "dir@utn.edu.ar", "password": "secreto"}))
        );
    }

    #[test]
    fn login_without_token_is_rejected() {
        let backend = MemoryBackend::new();
        backend.respond_json("http://api/auth/login", "{}");
        let err = block_on(login(&backend, BASE, &credenciales())).unwrap_err();
        assert_eq!(err.to_string(), "Credenciales incorrectas");

        backend.respond("http://api/auth/login", ApiResponse::new(401, r#"{"message":"Usuario bloqueado"}"#));
        let err = block_on(login(&backend, BASE, &credenciales())).unwrap_err();
        assert_eq!(err.to_string(), "Usuario bloqueado");
    }

    #[test]
    fn login_offline_is_a_network_error() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        let err = block_on(login(&backend, BASE, &credenciales())).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn register_reports_raw_text() {
        let backend = MemoryBackend::new();
        backend.respond("http://api/auth/register", ApiResponse::new(409, "El email ya existe"));
        let err = block_on(register(&backend, BASE, &credenciales())).unwrap_err();
        assert_eq!(err.to_string(), "El email ya existe");
    }

    #[test]
    fn oid_is_found_in_every_known_shape() {
        assert_eq!(extraer_oid_persona(&json!({"oidPersona": 4})), Some(4));
        assert_eq!(extraer_oid_persona(&json!({"id": "9"})), Some(9));
        assert_eq!(extraer_oid_persona(&json!({"persona": {"oidPersona": 2}})), Some(2));
        assert_eq!(extraer_oid_persona(&json!({"data": {"oidPersona": 8}})), Some(8));
        assert_eq!(extraer_oid_persona(&json!({"nombre": "x"})), None);
        assert_eq!(extraer_oid_persona(&Value::Null), None);
    }

    #[test]
    fn user_creation_chains_both_calls() {
        let backend = MemoryBackend::new();
        backend.respond_json(
            "http://api/administrador/personas/agregarPersona/3",
            r#"{"persona":{"oidPersona":21}}"#,
        );
        backend.respond_json("http://api/administrador/usuarios/asociarUsuario", "");
        let client = ApiClient::new(&backend, Some("tok".into()));

        let envio = UsuarioEnvio {
            grupo: 3,
            persona: PersonaPayload {
                nombre: "Eva".into(),
                apellido: "Luna".into(),
                horas_semanales: 10.0,
                detalle: DetallePersona::Personal { tipo_personal: None },
            },
            email: "eva@utn.edu.ar".into(),
            password: "secreto".into(),
            role: Role::Director,
        };

        let mensaje = block_on(crear_usuario(&client, BASE, &envio)).unwrap();
        assert_eq!(mensaje, "Usuario creado y asociado a persona correctamente");

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(
            requests[1].body,
            RequestBody::Json(json!({
                "oidPersona": 21,
                "email": "eva@utn.edu.ar",
                "password": "secreto",
                "role": "DIRECTOR"
            }))
        );
    }

    #[test]
    fn user_creation_stops_without_oid() {
        let backend = MemoryBackend::new();
        backend.respond_json("http://api/administrador/personas/agregarPersona/3", r#"{"ok":true}"#);
        let client = ApiClient::new(&backend, None);
        let envio = UsuarioEnvio {
            grupo: 3,
            persona: PersonaPayload {
                nombre: String::new(),
                apellido: String::new(),
                horas_semanales: 0.0,
                detalle: DetallePersona::IntegranteConsejoEducativo { cargo: None },
            },
            email: "x@y.z".into(),
            password: "secreto".into(),
            role: Role::Integrante,
        };

        assert!(block_on(crear_usuario(&client, BASE, &envio)).is_err());
        assert_eq!(backend.requests().len(), 1);
    }
}
