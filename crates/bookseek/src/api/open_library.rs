use log::{info, trace};
use serde_json::Value;

use crate::{isbn::Isbn, record::Record};

use super::{Client, Error, ErrorKind};

macro_rules! isbn_url {
    ($base: expr, $isbn: expr) => {
        format!("{}/isbn/{}.json", $base.trim_end_matches('/'), $isbn)
    };
}

pub(crate) fn get_record<C: Client>(
    client: &C,
    base_url: &str,
    isbn: &Isbn,
) -> Result<Record, Error> {
    let isbn = isbn.normalized();
    let url = isbn_url!(base_url, isbn);
    info!("Searching for ISBN '{isbn}' using Open Library API");

    let value: Value = client.get_json(&url).map_err(|e| describe(e, isbn, &url))?;

    trace!("Request was successful");

    if value.get("error").and_then(Value::as_str) == Some("notfound") {
        return Err(Error::new(
            ErrorKind::LogicalNotFound,
            format!("ISBN {isbn} not found."),
        ));
    }
    if is_empty(&value) {
        return Err(Error::new(
            ErrorKind::LogicalNotFound,
            format!("ISBN {isbn} not found or no data available."),
        ));
    }

    if value.is_object() {
        serde_json::from_value(value)
            .map_err(|e| describe(Error::wrap(ErrorKind::Deserialize, e), isbn, &url))
    } else {
        // only objects carry book fields
        Ok(Record::default())
    }
}

fn describe(err: Error, isbn: &str, url: &str) -> Error {
    let cause = std::error::Error::source(&err)
        .map_or_else(|| err.to_string(), ToString::to_string);
    let message = match err.kind() {
        ErrorKind::NotFound => format!("ISBN {isbn} not found (404 error)."),
        ErrorKind::HttpStatus(code) => {
            format!("API request failed with status {code}: {cause}")
        }
        ErrorKind::EmptyResponse => {
            format!("ISBN {isbn} not found or API returned an empty response.")
        }
        ErrorKind::Deserialize => format!(
            "Could not decode JSON response from {url}. The response might not be valid JSON."
        ),
        ErrorKind::Timeout => format!("Request to Open Library API timed out accessing {url}"),
        ErrorKind::Connectivity => format!("Could not connect to Open Library API: {cause}"),
        ErrorKind::InvalidFormat | ErrorKind::LogicalNotFound => return err,
    };
    err.context(message)
}

/// Values that carry no data at all, mirroring how the API signals "nothing here".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
