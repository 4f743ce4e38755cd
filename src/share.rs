//! Share link construction

/// Path prefix of public share pages
pub const SHARE_PATH: &str = "/shared";

/// Full public URL for a share token: `{origin}/shared/{token}`
pub fn share_url(origin: &str, token: &str) -> String {
    format!("{}{}/{}", origin.trim_end_matches('/'), SHARE_PATH, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("http://localhost:5173", "abc123"),
            "http://localhost:5173/shared/abc123"
        );
        assert_eq!(
            share_url("https://files.example.com/", "t"),
            "https://files.example.com/shared/t"
        );
    }
}
