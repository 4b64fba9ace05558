#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! # bookseek
//!
//! bookseek looks up book details by ISBN using the Open Library API. The ISBN is checked for
//! a plausible shape with [`Isbn::parse`] before any request is made, the response is decoded
//! into a [`Record`] and [`report`] writes it, or the reason there is nothing to show, as
//! human readable text.

mod api;
mod error;
mod isbn;
pub mod record;
mod report;

use std::time::Duration;

pub use api::{client, Client};
pub use error::{Error, ErrorKind};
pub use isbn::{is_valid_format, Isbn};
pub use record::{Book, Record};
pub use report::{report, Outcome};

use log::trace;

/// Base URL of the Open Library API.
pub const DEFAULT_API_URL: &str = "https://openlibrary.org";

/// How long a lookup may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Search the book record for `isbn` at the API found at `base_url`.
///
/// # Errors
///
/// An [`Err`] is returned when the API cannot be reached in time, responds with an error
/// status, or responds with something that is not a book record. The [`ErrorKind`] tells
/// which.
#[inline]
pub fn record_by_isbn<C: Client>(
    client: &C,
    base_url: &str,
    isbn: &Isbn,
) -> Result<Record, Error> {
    trace!("Search record by ISBN of '{isbn}'");
    api::open_library::get_record(client, base_url, isbn)
}
