//! Interprets `Content-Type` header values as (media type, character set).

use encoding_rs::Encoding;

/// The media type and character set declared by a `Content-Type` header.
///
/// Parsing never fails: a blank media type, a missing `charset` parameter,
/// or a charset label the encoding registry does not recognize all simply
/// leave the corresponding part unset.
///
/// # Examples
///
/// ```
/// use vandah::ContentType;
///
/// let content_type = ContentType::parse("application/json; charset=utf-8");
/// assert_eq!(content_type.media_type(), Some("application/json"));
/// assert_eq!(content_type.charset(), Some(encoding_rs::UTF_8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentType {
    media_type: Option<String>,
    charset: Option<&'static Encoding>,
}

impl ContentType {
    /// Parses a raw header value of the form `type/subtype; param=value; ...`.
    ///
    /// The media type is the first `;`-delimited component, trimmed; blank
    /// yields none. The character set comes from the first parameter whose
    /// name, trimmed and compared case-insensitively, is `charset`; its
    /// value is resolved through the WHATWG encoding label registry, and an
    /// empty or unrecognized label yields none. Parameters without `=` are
    /// skipped.
    pub fn parse(header: &str) -> Self {
        let mut components = header.split(';');
        let media_type = components
            .next()
            .map(str::trim)
            .filter(|component| !component.is_empty())
            .map(str::to_owned);
        let mut charset = None;
        for parameter in components {
            let mut parts = parameter.splitn(2, '=');
            if let (Some(name), Some(value)) = (parts.next(), parts.next()) {
                if name.trim().eq_ignore_ascii_case("charset") {
                    charset = Encoding::for_label(value.trim().as_bytes());
                    break;
                }
            }
        }
        Self { media_type, charset }
    }

    /// The content type of a response without a `Content-Type` header:
    /// both parts unset.
    pub fn unspecified() -> Self {
        Self::default()
    }

    /// The declared media type, e.g. `application/json`.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// The declared character set, if it was recognized.
    pub fn charset(&self) -> Option<&'static Encoding> {
        self.charset
    }
}
