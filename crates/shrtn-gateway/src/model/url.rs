use ::url::form_urlencoded;

const LONGURL_FIELD: &str = "longurl";

/// Fields of `POST /new`. A missing `longurl` is treated as empty.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateMappingForm {
    pub longurl: String,
}

impl CreateMappingForm {
    /// Reads `longurl` from a form-encoded body, then from the query string.
    /// The first occurrence wins.
    pub fn parse(body: &[u8], query: Option<&str>) -> Self {
        let query = query.unwrap_or_default().as_bytes();

        let longurl = form_urlencoded::parse(body)
            .chain(form_urlencoded::parse(query))
            .find(|(key, _)| key == LONGURL_FIELD)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        Self { longurl }
    }
}
