use std::io::{self, Write};

use log::{debug, info};

use crate::{record_by_isbn, Client, Isbn};

/// How a lookup ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The book was found and its details written.
    Displayed,
    /// The ISBN points at another record, a notice naming it was written.
    Redirected,
    /// A record was found but it has nothing that can be shown as a book.
    NoDisplayableData,
    /// The lookup failed, the reason was written.
    NoData,
}

impl Outcome {
    /// Whether the lookup produced something useful for the user.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Displayed | Self::Redirected)
    }
}

/// Looks up `isbn` with `client` against the API at `base_url` and writes the result, or the
/// reason there is none, to `out`.
///
/// Lookup failures are written as messages and reflected in the returned [`Outcome`].
///
/// # Errors
///
/// An [`Err`] is only returned when writing to `out` fails.
pub fn report<C, W>(client: &C, base_url: &str, isbn: &Isbn, out: &mut W) -> io::Result<Outcome>
where
    C: Client,
    W: Write,
{
    let record = match record_by_isbn(client, base_url, isbn) {
        Ok(record) => record,
        Err(err) => {
            info!("Lookup failed ({:?})", err.kind());
            writeln!(out, "Error: {err}")?;
            writeln!(out, "Failed to retrieve book data for ISBN {isbn}.")?;
            return Ok(Outcome::NoData);
        }
    };

    if let Some(location) = record.redirect_location() {
        debug!("ISBN {isbn} redirects to {location}");
        writeln!(
            out,
            "Information for ISBN {isbn} has been redirected. You may need to look up: {location}"
        )?;
        Ok(Outcome::Redirected)
    } else if let Some(book) = record.book() {
        write!(out, "{book}")?;
        Ok(Outcome::Displayed)
    } else {
        writeln!(
            out,
            "No displayable information found for ISBN {isbn}, or the response was not structured as expected book data."
        )?;
        if let Some(target) = record.moved_to() {
            writeln!(out, "The record has been moved or merged, see: {target}")?;
        }
        Ok(Outcome::NoDisplayableData)
    }
}
