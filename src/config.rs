use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Rxassist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gemini model used for every LLM call (extraction, normalization, details).
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "rxassist=info"
}

/// Get the application data directory
/// ~/Rxassist/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Rxassist")
}

/// Default location of the session history database.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("prescription_sessions.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Rxassist"));
    }

    #[test]
    fn db_path_under_app_data() {
        let db = default_db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("prescription_sessions.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
