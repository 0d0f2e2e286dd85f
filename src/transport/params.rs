use hyper::HeaderMap;
use hyper::header::CONTENT_TYPE;
use hyper::http::request::Parts;
use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// The `type` and `body` parameters of a contest-server POST.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeParams {
    pub message_type: String,
    pub body: Option<String>,
}

impl EnvelopeParams {
    /// Collects the parameters from the query string and, for form-encoded
    /// requests, from the request body. The first occurrence of a name wins.
    ///
    /// Form values are percent-decoded as UTF-8. For any other content type
    /// the raw payload stands in for a missing `body` parameter.
    pub fn from_request(parts: &Parts, payload: &[u8]) -> Self {
        let mut message_type = None;
        let mut body = None;

        if let Some(query) = parts.uri.query() {
            collect(
                form_urlencoded::parse(query.as_bytes()),
                &mut message_type,
                &mut body,
            );
        }

        if is_form_encoded(&parts.headers) {
            collect(form_urlencoded::parse(payload), &mut message_type, &mut body);
        } else if body.is_none() && !payload.is_empty() {
            body = Some(String::from_utf8_lossy(payload).into_owned());
        }

        Self {
            message_type: message_type.unwrap_or_default(),
            body,
        }
    }
}

fn collect(
    pairs: form_urlencoded::Parse<'_>,
    message_type: &mut Option<String>,
    body: &mut Option<String>,
) {
    for (name, value) in pairs {
        match &*name {
            "type" if message_type.is_none() => *message_type = Some(value.into_owned()),
            "body" if body.is_none() => *body = Some(value.into_owned()),
            _ => {}
        }
    }
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}
