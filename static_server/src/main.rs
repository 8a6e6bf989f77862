use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{middleware, App, HttpServer};
use anyhow::{anyhow, Context};
use log::{info, warn};
use once_cell::sync::Lazy;
use rustls::{
    pki_types::{CertificateDer, PrivateKeyDer},
    server::ServerConfig,
};
use rustls_pemfile::{certs, private_key};
use std::{env, fs::File, io::BufReader, path::PathBuf};

/* ---------- configuration (.env + environnement) ------------------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
struct Config {
    bind: String,
    port: u16,
    dist_dir: PathBuf,
    tls: Option<(PathBuf, PathBuf)>,
}

impl Config {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("STATIC_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("STATIC_PORT invalide : {raw}"))?,
            None => 8444,
        };

        // TLS seulement si le certificat ET la clé sont fournis
        let tls = match (lookup("STATIC_TLS_CERT"), lookup("STATIC_TLS_KEY")) {
            (Some(cert), Some(key)) => Some((PathBuf::from(cert), PathBuf::from(key))),
            (None, None) => None,
            _ => return Err(anyhow!("STATIC_TLS_CERT et STATIC_TLS_KEY vont ensemble")),
        };

        Ok(Self {
            bind: lookup("STATIC_BIND").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            dist_dir: lookup("STATIC_DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../frontend/dist")),
            tls,
        })
    }

    fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| env::var(k).ok().filter(|v| !v.trim().is_empty()))
    }

    fn index(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

/* lu une fois au démarrage, partagé par les workers */
static CONFIG: Lazy<anyhow::Result<Config>> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    Config::from_env()
});

/* ---------- TLS ---------------------------------------------------------- */

fn build_tls_config(cert_path: &PathBuf, key_path: &PathBuf) -> anyhow::Result<ServerConfig> {
    let mut r = BufReader::new(
        File::open(cert_path).with_context(|| format!("ouverture de {}", cert_path.display()))?,
    );
    let certs: Vec<CertificateDer<'static>> = certs(&mut r)
        .collect::<Result<_, _>>()
        .context("certificat illisible")?;

    let mut r = BufReader::new(
        File::open(key_path).with_context(|| format!("ouverture de {}", key_path.display()))?,
    );
    let key: PrivateKeyDer<'static> = private_key(&mut r)
        .context("clé privée illisible")?
        .ok_or_else(|| anyhow!("aucune clé privée dans {}", key_path.display()))?;

    ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("configuration TLS")
}

/* ---------- main -------------------------------------------------------- */

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CONFIG.as_ref().map_err(|e| anyhow!("{e:#}"))?.clone();
    if !config.index().exists() {
        warn!("{} absent : lancer `trunk build` dans frontend/", config.index().display());
    }
    info!("fichiers statiques servis depuis {}", config.dist_dir.display());

    let dist_dir = config.dist_dir.clone();
    let server = HttpServer::new(move || {
        let index = dist_dir.join("index.html");
        App::new()
            .wrap(middleware::Logger::default())
            .service(
                Files::new("/", &dist_dir)
                    .index_file("index.html")
                    // toute route inconnue rend l'application (routage côté client)
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let res = NamedFile::open_async(&index).await?.into_response(&req);
                            Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                        }
                    })),
            )
    });

    let addr = (config.bind.as_str(), config.port);
    let server = match &config.tls {
        Some((cert, key)) => {
            info!("écoute sur https://{}:{}", config.bind, config.port);
            server.bind_rustls_0_23(addr, build_tls_config(cert, key)?)
        }
        None => {
            info!("écoute sur http://{}:{}", config.bind, config.port);
            server.bind(addr)
        }
    }
    .with_context(|| format!("impossible d'écouter sur {}:{}", config.bind, config.port))?;

    server.run().await.context("serveur arrêté sur erreur")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8444);
        assert!(config.dist_dir.ends_with("frontend/dist"));
        assert_eq!(config.tls, None);
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(lookup(&[
            ("STATIC_BIND", "127.0.0.1"),
            ("STATIC_PORT", "9000"),
            ("STATIC_DIST_DIR", "/srv/app"),
            ("STATIC_TLS_CERT", "certs/cert.pem"),
            ("STATIC_TLS_KEY", "certs/key.pem"),
        ]))
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.index(), PathBuf::from("/srv/app/index.html"));
        assert_eq!(
            config.tls,
            Some((PathBuf::from("certs/cert.pem"), PathBuf::from("certs/key.pem")))
        );
    }

    #[test]
    fn bad_port_or_half_tls_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("STATIC_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("STATIC_TLS_CERT", "c.pem")])).is_err());
    }
}
