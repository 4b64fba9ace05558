use std::{io, time::Duration};

use bookseek::Isbn;
use eyre::WrapErr;
use log::{info, trace};

/// Validates `raw` and, when it looks like an ISBN, reports the book found for it on stdout.
///
/// Returns whether something useful was shown to the user.
pub fn lookup(raw: &str, api_url: &str, timeout: Duration) -> eyre::Result<bool> {
    let isbn = match Isbn::parse(raw) {
        Ok(isbn) => isbn,
        Err(err) => {
            // rejected before any request is made
            println!("Error: {err}");
            return Ok(false);
        }
    };

    trace!("Building client with a timeout of {}s", timeout.as_secs_f32());
    let client = bookseek::client(timeout).wrap_err("Cannot prepare the ISBN lookup")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = bookseek::report(&client, api_url, &isbn, &mut out)
        .wrap_err("Cannot write the lookup result to stdout")?;

    info!("Lookup of ISBN {isbn} finished with {outcome:?}");
    Ok(outcome.is_success())
}
