// Charge frontend/.env (s'il existe) dans l'environnement de compilation,
// pour que `option_env!("API_BASE_URL")` le voie.

fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=build.rs");

    match dotenvy::from_filename_iter(".env") {
        Ok(vars) => {
            for (key, value) in vars.flatten() {
                // une variable déjà exportée l'emporte sur le fichier
                if std::env::var(&key).is_err() {
                    println!("cargo:rustc-env={key}={value}");
                }
            }
        }
        Err(_) => println!("cargo:warning=pas de fichier .env, valeurs par défaut utilisées"),
    }
}
