//! Tolerant JSON decoding of response bodies. The service replies to an
//! unknown station with an empty body rather than an empty array, so the
//! decoder treats missing, empty and whitespace-only input as "no results".

use serde::de::DeserializeOwned;
use std::any::type_name;
use std::io::{self, BufReader, Read};
use thiserror::Error;

/// A response body that could not be decoded as the expected JSON shape.
#[derive(Debug, Error)]
#[error("cannot decode response body as {shape}")]
pub struct DecodeError {
    shape: &'static str,
    #[source]
    source: serde_json::Error,
}

/// Decodes a JSON array of `T` from a body stream.
///
/// A missing body, an empty body and a whitespace-only body all decode to
/// an empty vector. Anything else must be a well-formed JSON array; a
/// read failure is an error even when only whitespace had been read.
pub(crate) fn tolerant_array<T, R>(body: Option<R>) -> Result<Vec<T>, DecodeError>
where
    T: DeserializeOwned,
    R: Read,
{
    let Some(body) = body else {
        return Ok(Vec::new());
    };
    let mut watcher = WhitespaceWatcher::new(body);
    match serde_json::from_reader(BufReader::new(&mut watcher)) {
        Ok(values) => Ok(values),
        Err(source) if !source.is_io() && watcher.only_whitespace() => Ok(Vec::new()),
        Err(source) => Err(DecodeError {
            shape: type_name::<Vec<T>>(),
            source,
        }),
    }
}

/// Passthrough reader that remembers whether every byte seen so far was
/// ASCII whitespace.
struct WhitespaceWatcher<R> {
    inner: R,
    only_whitespace: bool,
}

impl<R> WhitespaceWatcher<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            only_whitespace: true,
        }
    }

    fn only_whitespace(&self) -> bool {
        self.only_whitespace
    }
}

impl<R: Read> Read for WhitespaceWatcher<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if self.only_whitespace {
            self.only_whitespace = buf[..n].iter().all(u8::is_ascii_whitespace);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(body: &str) -> Result<Vec<i32>, DecodeError> {
        tolerant_array(Some(Cursor::new(body.as_bytes().to_vec())))
    }

    #[test]
    fn missing_body_decodes_to_empty() {
        let values: Vec<i32> = tolerant_array(None::<io::Empty>).unwrap();
        assert!(values.is_empty(), "missing body must yield no values");
    }

    #[test]
    fn empty_body_decodes_to_empty() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn whitespace_body_decodes_to_empty() {
        assert!(decode(" \t\r\n\x0c ").unwrap().is_empty());
    }

    #[test]
    fn array_body_decodes_to_values() {
        assert_eq!(decode("[1, 2, 3]").unwrap(), vec![1, 2, 3]);
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn garbage_body_is_an_error() {
        let err = decode("X").unwrap_err();
        assert!(
            err.to_string().contains("cannot decode response body as"),
            "{err}"
        );
        assert!(err.to_string().contains("i32"), "{err}");
    }

    #[test]
    fn garbage_after_whitespace_is_an_error() {
        assert!(decode(" \n X").is_err(), "leading whitespace must not excuse garbage");
    }

    #[test]
    fn null_body_is_an_error() {
        assert!(decode("null").is_err(), "JSON null is not an array");
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(decode("[1] whoops").is_err());
    }

    /// Yields a single space, then fails. The read failure must surface
    /// even though only whitespace was ever produced.
    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            self.sent = true;
            buf[0] = b' ';
            Ok(1)
        }
    }

    #[test]
    fn read_failure_is_an_error_despite_whitespace() {
        let outcome: Result<Vec<i32>, _> = tolerant_array(Some(FailingReader { sent: false }));
        let err = outcome.unwrap_err();
        assert!(err.source.is_io(), "the serde error should wrap the I/O failure");
    }
}
