use async_trait::async_trait;
use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Blob, BlobPropertyBag, File, FormData, HtmlAnchorElement, Url};

use gestion_core::download::Descarga;
use gestion_core::http::{Archivo, HttpMethod, RequestBody};
use gestion_core::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpBackend};

/* -------------------------------------------------------------------------- */
/*                        transport navigateur (fetch)                         */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooBackend;

pub type Client = ApiClient<GlooBackend>;

pub fn client(token: Option<&str>) -> Client {
    ApiClient::new(GlooBackend, token.map(str::to_string))
}

fn red(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn js(e: JsValue) -> ApiError {
    ApiError::Network(format!("{e:?}"))
}

fn blob(parts: &JsValue, tipo: &str) -> Result<Blob, JsValue> {
    let props = BlobPropertyBag::new();
    props.set_type(tipo);
    Blob::new_with_u8_array_sequence_and_options(&Array::of1(parts), &props)
}

/// Partie `documento` en JSON + partie `archivo` binaire. Le navigateur pose
/// lui-même l'en-tête `Content-Type` avec la frontière multipart.
fn form_data(documento: &Value, archivo: Option<&Archivo>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;

    let json = Uint8Array::from(documento.to_string().as_bytes());
    form.append_with_blob("documento", &blob(&json, "application/json")?)?;

    if let Some(a) = archivo {
        let contenido = Uint8Array::from(a.contenido.as_slice());
        form.append_with_blob_and_filename("archivo", &blob(&contenido, &a.tipo_mime)?, &a.nombre)?;
    }
    Ok(form)
}

#[async_trait(?Send)]
impl HttpBackend for GlooBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        let builder = match &request.bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        };

        let pending = match &request.body {
            RequestBody::Vacio => builder.build().map_err(red)?,
            RequestBody::Json(body) => builder.json(body).map_err(red)?,
            RequestBody::Multipart { documento, archivo } => {
                let form = form_data(documento, archivo.as_ref()).map_err(js)?;
                builder.body(form).map_err(red)?
            }
        };

        let resp = pending.send().await.map_err(red)?;
        let status = resp.status();
        let content_disposition = resp.headers().get("content-disposition");
        let body = resp.binary().await.map_err(red)?;

        Ok(ApiResponse {
            status,
            body,
            content_disposition,
        })
    }
}

/* -------------------------------------------------------------------------- */
/*                         fichiers : lecture / écriture                       */
/* -------------------------------------------------------------------------- */

/// Lit un `<input type="file">` en mémoire.
pub async fn leer_archivo(file: File) -> Result<Archivo, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Archivo {
        nombre: file.name(),
        tipo_mime: file.type_(),
        contenido: Uint8Array::new(&buffer).to_vec(),
    })
}

/// Déclenche l'enregistrement côté navigateur via une URL objet temporaire.
pub fn guardar(descarga: &Descarga) -> Result<(), JsValue> {
    let contenido = Uint8Array::from(descarga.contenido.as_slice());
    let blob = blob(&contenido, "application/octet-stream")?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document indisponible"))?;
    let a: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    a.set_href(&url);
    a.set_download(&descarga.nombre);
    a.click();

    Url::revoke_object_url(&url)
}

/// Année courante selon l'horloge du navigateur.
pub fn anio_actual() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}
