//! URL acceptance rules

use crate::utils::{Result, YtLoaderError};

/// Host fragments a supported URL must contain
const SUPPORTED_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Whether the URL points at a supported video host
pub fn is_supported_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && SUPPORTED_HOSTS.iter().any(|host| url.contains(host))
}

/// Reject unsupported URLs before any external tool runs
pub fn validate_url(url: &str) -> Result<()> {
    if is_supported_url(url) {
        Ok(())
    } else {
        Err(YtLoaderError::InvalidUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_youtube_hosts() {
        assert!(is_supported_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_supported_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_supported_url("  https://music.youtube.com/watch?v=x  "));
    }

    #[test]
    fn test_rejects_other_input() {
        assert!(!is_supported_url(""));
        assert!(!is_supported_url("   "));
        assert!(!is_supported_url("https://vimeo.com/12345"));
        assert!(matches!(
            validate_url("not a url"),
            Err(YtLoaderError::InvalidUrl(_))
        ));
    }
}
