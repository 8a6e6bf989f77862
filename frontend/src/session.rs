use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

use gestion_core::session::{SessionError, SessionStore, SESSION_KEY};
use gestion_core::Usuario;

use crate::api::{self, Client};

/* ---------------- stockage localStorage ------------------ */
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load_raw(&self) -> Option<String> {
        LocalStorage::raw().get_item(SESSION_KEY).ok().flatten()
    }

    fn save_raw(&self, raw: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(SESSION_KEY, raw)
            .map_err(|e| SessionError::Storage(format!("{e:?}")))
    }

    fn clear(&self) {
        LocalStorage::delete(SESSION_KEY);
    }
}

pub type SessionHandle = UseStateHandle<Option<Usuario>>;

/* ---------------- hooks pratiques -------------------- */
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider manquant")
}

/// Client HTTP portant le jeton de la session courante.
#[hook]
pub fn use_client() -> Client {
    let session = use_session();
    api::client((*session).as_ref().and_then(Usuario::token))
}

pub fn iniciar(session: &SessionHandle, usuario: Usuario) {
    if let Err(e) = LocalSessionStore.save(&usuario) {
        log::error!("session non persistée : {e}");
    }
    session.set(Some(usuario));
}

pub fn cerrar(session: &SessionHandle) {
    LocalSessionStore.clear();
    session.set(None);
}

/* -------------- props du provider ----------------- */
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

/* -------------- provider global ------------------- */
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_state(|| LocalSessionStore.load());

    html! {
        <ContextProvider<SessionHandle> context={session}>
            { for props.children.iter() }
        </ContextProvider<SessionHandle>>
    }
}
