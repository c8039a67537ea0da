use url::Url;

/// Removes an explicit port from a public URL so links shown in Discord stay clean.
///
/// Unparsable input is returned unchanged.
pub fn strip_port(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.port().is_some() && url.set_port(None).is_ok() {
                return url.to_string().trim_end_matches('/').to_string();
            }
            raw.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_explicit_port() {
        assert_eq!(
            strip_port("http://dashboard.example.com:6767"),
            "http://dashboard.example.com"
        );
    }

    #[test]
    fn keeps_url_without_port() {
        assert_eq!(
            strip_port("https://dashboard.example.com/panel"),
            "https://dashboard.example.com/panel"
        );
    }

    #[test]
    fn returns_invalid_input_unchanged() {
        assert_eq!(strip_port("not a url"), "not a url");
    }
}
