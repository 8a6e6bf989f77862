//! Abstraction du transport HTTP : le frontend fournit l'implémentation
//! navigateur, les tests une implémentation en mémoire.

use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Fichier joint d'un formulaire multipart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archivo {
    pub nombre: String,
    pub tipo_mime: String,
    pub contenido: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Vacio,
    Json(Value),
    /// Partie `documento` (JSON) + partie `archivo` (binaire).
    Multipart {
        documento: Value,
        archivo: Option<Archivo>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: RequestBody::Vacio,
            bearer: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, documento: Value, archivo: Option<Archivo>) -> Self {
        self.body = RequestBody::Multipart { documento, archivo };
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_disposition: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            content_disposition: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Transport brut. Une réponse non-2xx n'est PAS une erreur à ce niveau ;
/// seul un échec réseau l'est.
#[async_trait(?Send)]
pub trait HttpBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait(?Send)]
impl<B: HttpBackend + ?Sized> HttpBackend for &B {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request).await
    }
}

/* -------------------------------------------------------------------------- */
/*                        client authentifié (Bearer)                          */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug)]
pub struct ApiClient<B> {
    backend: B,
    token: Option<String>,
}

impl<B: HttpBackend> ApiClient<B> {
    pub fn new(backend: B, token: Option<String>) -> Self {
        Self { backend, token }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Envoie la requête avec le jeton de session et convertit les non-2xx en erreur.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = request.bearer(self.token.as_deref());
        debug!("{} {}", request.method.as_str(), request.url);

        let response = self.backend.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(url)).await?.json()
    }

    /// Un corps qui n'est pas un tableau donne une liste vide.
    pub async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        match self.get_json::<Value>(url).await? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| serde_json::from_value(v).map_err(ApiError::from))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// Accepte un objet seul ou un tableau (vue « mon groupe » vs liste admin).
    pub async fn get_one_or_many<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        match self.get_json::<Value>(url).await? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| serde_json::from_value(v).map_err(ApiError::from))
                .collect(),
            Value::Null => Ok(Vec::new()),
            single => Ok(vec![serde_json::from_value(single)?]),
        }
    }

    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::new(method, url).json(body)?).await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::Deserialize;

    use super::*;
    use crate::test_utils::MemoryBackend;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn bearer_token_is_attached() {
        let backend = MemoryBackend::new();
        backend.respond("http://api/x", ApiResponse::new(200, "[]"));
        let client = ApiClient::new(&backend, Some("tok".into()));

        let items: Vec<Item> = block_on(client.get_list("http://api/x")).unwrap();
        assert!(items.is_empty());
        assert_eq!(backend.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn empty_token_is_not_sent() {
        let request = ApiRequest::get("u").bearer(Some(""));
        assert_eq!(request.bearer, None);
    }

    #[test]
    fn non_success_becomes_http_error() {
        let backend = MemoryBackend::new();
        backend.respond("http://api/x", ApiResponse::new(404, "No encontrado"));
        let client = ApiClient::new(&backend, None);

        let err = block_on(client.get_json::<Item>("http://api/x")).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 404, message: "No encontrado".into() });
    }

    #[test]
    fn single_object_is_wrapped_in_a_list() {
        let backend = MemoryBackend::new();
        backend.respond("http://api/g", ApiResponse::new(200, r#"{"id":3}"#));
        let client = ApiClient::new(&backend, None);

        let items: Vec<Item> = block_on(client.get_one_or_many("http://api/g")).unwrap();
        assert_eq!(items, vec![Item { id: 3 }]);

        let as_list: Vec<Item> = block_on(client.get_list("http://api/g")).unwrap();
        assert!(as_list.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let backend = MemoryBackend::new();
        backend.respond("http://api/x", ApiResponse::new(200, "<html>"));
        let client = ApiClient::new(&backend, None);

        let err = block_on(client.get_json::<Item>("http://api/x")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
