use crate::utils::error::{BroadcastError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BroadcastError::ConfigError {
            message: format!("{}: URL cannot be empty", field_name),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BroadcastError::ConfigError {
                message: format!("{}: unsupported URL scheme: {}", field_name, scheme),
            }),
        },
        Err(e) => Err(BroadcastError::ConfigError {
            message: format!("{}: invalid URL format: {}", field_name, e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BroadcastError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(BroadcastError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_file_exists(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if !Path::new(path).is_file() {
        return Err(BroadcastError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found: {}", field_name, path),
        )));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BroadcastError::ConfigError {
            message: format!("{}: value cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("gateway", "https://example.com").is_ok());
        assert!(validate_url("gateway", "http://127.0.0.1:8799").is_ok());
        assert!(validate_url("gateway", "").is_err());
        assert!(validate_url("gateway", "invalid-url").is_err());
        assert!(validate_url("gateway", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("numbers", "./contacts.csv").is_ok());
        assert!(validate_path("numbers", "").is_err());
        assert!(validate_path("numbers", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_file_exists("numbers", file.path().to_str().unwrap()).is_ok());
        assert!(validate_file_exists("numbers", "/definitely/not/here.csv").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("client_id", "wa-broadcast").is_ok());
        assert!(validate_non_empty_string("client_id", "   ").is_err());
    }
}
