use shrtn_core::ShortenerError;
use std::fmt::{Display, Formatter};
use url::Url;

const HTTP_PREFIX: &str = "http://";

/// How user-submitted URLs are checked before being stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    /// Accept only input that parses as an absolute URL with a host.
    #[default]
    Strict,
    /// Accept anything, prefixing `http://` when it is missing.
    /// Never rejects, so garbage input is stored as a garbage URL.
    Lenient,
}

impl UrlPolicy {
    /// Normalizes `input` under this policy.
    pub fn normalize(self, input: &str) -> Result<String, ShortenerError> {
        match self {
            UrlPolicy::Strict => normalize_strict(input),
            UrlPolicy::Lenient => Ok(normalize_lenient(input)),
        }
    }
}

fn normalize_strict(input: &str) -> Result<String, ShortenerError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ShortenerError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(input)
        .map_err(|e| ShortenerError::InvalidUrl(format!("{input}: {e}")))?;

    if !parsed.has_host() {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must be absolute with a scheme and host: {input}"
        )));
    }

    Ok(input.to_string())
}

fn normalize_lenient(input: &str) -> String {
    if input.starts_with(HTTP_PREFIX) {
        input.to_string()
    } else {
        format!("{HTTP_PREFIX}{input}")
    }
}

impl Display for UrlPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlPolicy::Strict => write!(f, "strict"),
            UrlPolicy::Lenient => write!(f, "lenient"),
        }
    }
}
