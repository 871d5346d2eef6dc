//! Graph API endpoint URL builders
//!
//! Helper functions to construct endpoint URLs. `base_url` is the versioned
//! base, e.g. `https://graph.facebook.com/v21.0`.

/// Build the container-creation endpoint URL
pub fn media_url(base_url: &str, account_id: &str) -> String {
    format!("{}/{}/media", base_url, account_id)
}

/// Build the container-publish endpoint URL
pub fn media_publish_url(base_url: &str, account_id: &str) -> String {
    format!("{}/{}/media_publish", base_url, account_id)
}

/// Build the processing-status endpoint URL for a creation id
pub fn status_url(base_url: &str, creation_id: &str) -> String {
    format!("{}/{}", base_url, creation_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://graph.facebook.com/v21.0";

    #[test]
    fn test_media_url() {
        assert_eq!(
            media_url(BASE, "17841400000000000"),
            "https://graph.facebook.com/v21.0/17841400000000000/media"
        );
    }

    #[test]
    fn test_media_publish_url() {
        assert_eq!(
            media_publish_url(BASE, "17841400000000000"),
            "https://graph.facebook.com/v21.0/17841400000000000/media_publish"
        );
    }

    #[test]
    fn test_status_url() {
        assert_eq!(
            status_url(BASE, "17900000001"),
            "https://graph.facebook.com/v21.0/17900000001"
        );
    }
}
