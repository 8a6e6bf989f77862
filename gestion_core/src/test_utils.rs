//! Doubles en mémoire pour les tests : transport HTTP et stockage de session.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, HttpBackend};
use crate::session::{SessionError, SessionStore};

type Handler = Box<dyn FnMut(&ApiRequest) -> Option<ApiResponse>>;

/// Réponses préenregistrées par URL ; un handler optionnel passe en premier
/// pour les scénarios à état (création puis relecture).
#[derive(Default)]
pub struct MemoryBackend {
    responses: RefCell<HashMap<String, ApiResponse>>,
    handler: RefCell<Option<Handler>>,
    requests: RefCell<Vec<ApiRequest>>,
    offline: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, response: ApiResponse) {
        self.responses.borrow_mut().insert(url.to_string(), response);
    }

    pub fn respond_json(&self, url: &str, body: &str) {
        self.respond(url, ApiResponse::new(200, body));
    }

    pub fn handler(&self, f: impl FnMut(&ApiRequest) -> Option<ApiResponse> + 'static) {
        *self.handler.borrow_mut() = Some(Box::new(f));
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpBackend for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(ApiError::Network("Failed to fetch".into()));
        }

        if let Some(handler) = self.handler.borrow_mut().as_mut() {
            if let Some(response) = handler(&request) {
                return Ok(response);
            }
        }

        Ok(self
            .responses
            .borrow()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, "")))
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    raw: RefCell<Option<String>>,
}

impl SessionStore for MemorySessionStore {
    fn load_raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    fn save_raw(&self, raw: &str) -> Result<(), SessionError> {
        *self.raw.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.raw.borrow_mut().take();
    }
}
