//! Noms de fichiers des téléchargements (documents, export des mémoires).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::http::ApiResponse;
use crate::Oid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descarga {
    pub nombre: String,
    pub contenido: Vec<u8>,
}

static FILENAME_EXTENDIDO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\*\s*=\s*"?(?:[^'";]*'[^'";]*')?([^";]+)"?"#).expect("filename* regex")
});

static FILENAME_SIMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\s*=\s*(?:"([^"]*)"|([^";]*))"#).expect("filename regex")
});

/// Extrait le nom de `Content-Disposition`, `filename*` (RFC 5987) en priorité.
pub fn nombre_desde_cabecera(cabecera: &str) -> Option<String> {
    let extendido = FILENAME_EXTENDIDO
        .captures(cabecera)
        .and_then(|c| c.get(1))
        .map(|m| percent_decode(m.as_str().trim()))
        .filter(|n| !n.is_empty());
    if extendido.is_some() {
        return extendido;
    }

    FILENAME_SIMPLE
        .captures(cabecera)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|n| !n.is_empty())
}

fn percent_decode(input: &str) -> String {
    fn hex(b: u8) -> Option<u8> {
        (b as char).to_digit(16).map(|d| d as u8)
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Réponse de `descargarDocumento` ; corps vide = pas de fichier.
pub fn descarga_documento(respuesta: ApiResponse, titulo: &str) -> Result<Descarga, ApiError> {
    if respuesta.body.is_empty() {
        return Err(ApiError::EmptyFile);
    }
    let nombre = respuesta
        .content_disposition
        .as_deref()
        .and_then(nombre_desde_cabecera)
        .unwrap_or_else(|| format!("documento_{titulo}"));

    Ok(Descarga { nombre, contenido: respuesta.body })
}

pub fn descarga_memoria(respuesta: ApiResponse, oid_memoria: Oid) -> Descarga {
    Descarga {
        nombre: format!("memoria_{oid_memoria}.xlsx"),
        contenido: respuesta.body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename() {
        assert_eq!(
            nombre_desde_cabecera(r#"attachment; filename="informe 2024.pdf""#).as_deref(),
            Some("informe 2024.pdf")
        );
    }

    #[test]
    fn extended_filename_wins() {
        let h = r#"attachment; filename="fallback.pdf"; filename*=UTF-8''a%C3%B1o%202024.pdf"#;
        assert_eq!(nombre_desde_cabecera(h).as_deref(), Some("año 2024.pdf"));
    }

    #[test]
    fn bare_filename_any_case() {
        assert_eq!(nombre_desde_cabecera("attachment; FileName=acta.docx").as_deref(), Some("acta.docx"));
        assert_eq!(nombre_desde_cabecera("inline"), None);
        assert_eq!(nombre_desde_cabecera(r#"attachment; filename="""#), None);
    }

    #[test]
    fn missing_header_uses_title() {
        let resp = ApiResponse::new(200, vec![1, 2, 3]);
        let d = descarga_documento(resp, "Acta").unwrap();
        assert_eq!(d.nombre, "documento_Acta");
        assert_eq!(d.contenido, vec![1, 2, 3]);
    }

    #[test]
    fn empty_body_means_no_file() {
        let resp = ApiResponse::new(200, Vec::new());
        assert_eq!(descarga_documento(resp, "Acta"), Err(ApiError::EmptyFile));
    }

    #[test]
    fn memoria_export_name() {
        let d = descarga_memoria(ApiResponse::new(200, vec![0]), 12);
        assert_eq!(d.nombre, "memoria_12.xlsx");
    }
}
