use std::time::Duration;

use log::{debug, trace};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub(crate) mod open_library;

/// The transport used to fetch documents from a lookup API.
///
/// Implementors report transport problems with the [`ErrorKind`] that best classifies them
/// and leave describing the error to the caller, who knows what was being looked up.
pub trait Client {
    /// Fetches the body at `url` as text.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the request fails, the response has an error status or
    /// the body is empty.
    fn get_text(&self, url: &str) -> Result<String, Error>;

    /// Fetches the body at `url` and decodes it as JSON.
    ///
    /// # Errors
    ///
    /// Any error from [`Client::get_text`], or an [`ErrorKind::Deserialize`] error when the
    /// body is not valid JSON for `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get_text(url).and_then(|text| {
            serde_json::from_str(&text).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
        })
    }
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        trace!("GET {url}");
        let resp = self.get(url).send().map_err(transport_error)?;

        let status = resp.status();
        debug!("{url} responded with {status}");
        if status == StatusCode::NOT_FOUND {
            return Err(Error::new(ErrorKind::NotFound, format!("{url} was not found")));
        }
        if let Err(e) = resp.error_for_status_ref() {
            return Err(Error::wrap(ErrorKind::HttpStatus(status.as_u16()), e));
        }

        let text = resp.text().map_err(transport_error)?;

        if text.is_empty() {
            Err(Error::new(ErrorKind::EmptyResponse, "Response text is empty"))
        } else {
            Ok(text)
        }
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::wrap(ErrorKind::Timeout, e)
    } else {
        Error::wrap(ErrorKind::Connectivity, e)
    }
}

/// Builds the default blocking client with every request bounded by `timeout`.
///
/// # Errors
///
/// An [`Err`] is returned when the TLS backend or system configuration cannot be
/// initialised.
pub fn client(timeout: Duration) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::wrap(ErrorKind::Connectivity, e).context("Cannot build the HTTP client"))
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, TimeoutProducer,
    URL_SINK,
};

use crate::{Error, ErrorKind};


#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_client() -> reqwest::blocking::Client {
        client(Duration::from_secs(5)).expect("client builds with default TLS backend")
    }

    #[test]
    fn ok_response_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/isbn/0123456789.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"title":"Test Book"}"#);
        });

        let text = test_client()
            .get_text(&server.url("/isbn/0123456789.json"))
            .unwrap();

        mock.assert();
        assert_eq!(r#"{"title":"Test Book"}"#, text);
    }

    #[test]
    fn not_found_status_is_classified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404);
        });

        let err = test_client().get_text(&server.url("/missing")).unwrap_err();
        assert_eq!(ErrorKind::NotFound, err.kind());
    }

    #[test]
    fn server_error_status_keeps_the_code() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });

        let err = test_client().get_text(&server.url("/broken")).unwrap_err();
        assert_eq!(ErrorKind::HttpStatus(500), err.kind());
    }

    #[test]
    fn empty_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("");
        });

        let err = test_client().get_text(&server.url("/empty")).unwrap_err();
        assert_eq!(ErrorKind::EmptyResponse, err.kind());
    }

    #[test]
    fn slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .body("{}")
                .delay(Duration::from_millis(1500));
        });

        let client = client(Duration::from_millis(200)).unwrap();
        let err = client.get_text(&server.url("/slow")).unwrap_err();
        assert_eq!(ErrorKind::Timeout, err.kind());
    }

    #[test]
    fn closed_port_is_a_connectivity_error() {
        // port 1 (tcpmux) is not expected to be listening on a test machine
        let err = test_client()
            .get_text("http://127.0.0.1:1/isbn/0123456789.json")
            .unwrap_err();
        assert_eq!(ErrorKind::Connectivity, err.kind());
    }

    impl_text_producer! {
        InvalidJsonProducer => Ok("not json".to_owned()),
    }

    #[test]
    fn get_json_reports_invalid_json_as_deserialize_error() {
        let err = MockClient::<InvalidJsonProducer>::default()
            .get_json::<serde_json::Value>("http://localhost/test")
            .unwrap_err();

        assert_eq!(ErrorKind::Deserialize, err.kind());
        assert_url!("http://localhost/test");
    }
}
