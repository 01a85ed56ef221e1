use log::{trace, warn};
use soranks_core::stackexchange::parse_api_key;
use std::fs;
use std::path::Path;

/// Reads the Stack Exchange API key, treating any problem as "no key"
pub fn load_api_key(path: &Path) -> Option<String> {
    if !path.exists() {
        warn!("Can't find API key: {}", path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(raw) => {
            let key = parse_api_key(&raw);
            if key.is_none() {
                warn!("API key file is empty: {}", path.display());
            } else {
                trace!("API key loaded from {}", path.display());
            }
            key
        }
        Err(e) => {
            warn!("Can't load API key: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_api_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.key");
        fs::write(&path, "Xy9)kq((\n").unwrap();

        assert_eq!(load_api_key(&path), Some("Xy9)kq((".to_string()));
    }

    #[test]
    fn test_load_api_key_missing() {
        let dir = TempDir::new().unwrap();

        assert_eq!(load_api_key(&dir.path().join("api.key")), None);
    }

    #[test]
    fn test_load_api_key_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.key");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_api_key(&path), None);
    }

    #[test]
    fn test_load_api_key_unreadable() {
        // A directory exists but cannot be read as a file
        let dir = TempDir::new().unwrap();

        assert_eq!(load_api_key(dir.path()), None);
    }
}
