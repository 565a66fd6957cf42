use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "SIMULADOR_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "datos_usuarios";

/// Snapshot directory: explicit flag, then `SIMULADOR_DATA_DIR`, then
/// `datos_usuarios` under the working directory.
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    resolve_data_dir(flag, std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir(flag: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    flag.or_else(|| {
        env_value
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
