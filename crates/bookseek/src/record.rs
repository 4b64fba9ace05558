//! The book record returned by the lookup API and its text presentation.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};

const NOT_AVAILABLE: &str = "Not available";
const REDIRECT_TYPE: &str = "/type/redirect";

/// A decoded record from the lookup API.
///
/// Every field is optional because the API omits anything it does not know. A field holding a
/// value of an unexpected shape is treated as absent rather than failing the whole record.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Record {
    /// Title of the edition.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<Scalar>,
    /// References to the authors, usually only carrying a `key`.
    #[serde(default, deserialize_with = "lenient")]
    pub authors: Option<Vec<AuthorRef>>,
    /// Free text publish date, e.g. `2004` or `June 2004`.
    #[serde(default, deserialize_with = "lenient")]
    pub publish_date: Option<Scalar>,
    /// Page count of the edition.
    #[serde(default, deserialize_with = "lenient")]
    pub number_of_pages: Option<Scalar>,
    /// Publisher names in the order given by the API.
    #[serde(default, deserialize_with = "lenient")]
    pub publishers: Option<Vec<String>>,
    /// Record type, marks a redirect when the identifier has moved.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<RecordType>,
    /// Target of a redirect.
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    /// Records this one was moved or merged into.
    #[serde(default, deserialize_with = "lenient")]
    pub see_also: Option<Vec<String>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A reference to an author of a [`Record`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AuthorRef {
    /// API key of the author, e.g. `/authors/OL1A`.
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    /// Display name, rarely populated by the ISBN endpoint.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// The `type` of a [`Record`].
///
/// Open Library sends `{"key": "/type/redirect"}` but a bare string is accepted as well.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordType {
    /// Object form with a `key`.
    Keyed {
        /// Type key.
        key: String,
    },
    /// Plain string form.
    Name(String),
}

impl RecordType {
    /// The type key regardless of the form it was sent in.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Keyed { key } | Self::Name(key) => key,
        }
    }
}

/// A single JSON value shown as is, e.g. a page count sent as `914` or `"xii, 914"`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(serde_json::Number),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Whether the value carries nothing: empty text, zero or `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Bool(b) => !b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Record {
    /// Returns the redirect target when this record only points at another resource.
    #[must_use]
    pub fn redirect_location(&self) -> Option<&str> {
        self.kind
            .as_ref()
            .filter(|kind| kind.key() == REDIRECT_TYPE)
            .and(self.location.as_deref().filter(|l| !l.is_empty()))
    }

    /// Returns the first record this one was moved or merged into, if any.
    #[must_use]
    pub fn moved_to(&self) -> Option<&str> {
        self.see_also
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    /// Returns a displayable [`Book`] when the record has a title.
    #[must_use]
    pub fn book(&self) -> Option<Book<'_>> {
        match &self.title {
            Some(title) if !title.is_empty() => Some(Book {
                title,
                record: self,
            }),
            _ => None,
        }
    }
}

/// A [`Record`] with a title, rendered line by line through [`fmt::Display`].
#[derive(Clone, Copy, Debug)]
pub struct Book<'a> {
    title: &'a Scalar,
    record: &'a Record,
}

impl Book<'_> {
    /// The title of the book.
    #[must_use]
    pub const fn title(&self) -> &Scalar {
        self.title
    }

    /// Author names joined by `, `.
    ///
    /// The ISBN endpoint only links authors by key, so when no names are present the keys are
    /// listed instead.
    #[must_use]
    pub fn authors(&self) -> String {
        let authors = self.record.authors.as_deref().unwrap_or_default();
        let names = non_empty(authors.iter().map(|a| a.name.as_deref()));
        if !names.is_empty() {
            return names.join(", ");
        }

        let keys = non_empty(authors.iter().map(|a| a.key.as_deref()));
        if keys.is_empty() {
            NOT_AVAILABLE.to_owned()
        } else {
            format!(
                "Author keys: {} (Further lookup needed for names)",
                keys.join(", ")
            )
        }
    }

    /// Publisher names joined by `, `.
    #[must_use]
    pub fn publishers(&self) -> String {
        match self.record.publishers.as_deref() {
            Some(publishers) if !publishers.is_empty() => publishers.join(", "),
            _ => NOT_AVAILABLE.to_owned(),
        }
    }
}

fn or_not_available(value: Option<&Scalar>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), ToString::to_string)
}

fn non_empty<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    values.flatten().filter(|s| !s.is_empty()).collect()
}

impl fmt::Display for Book<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author(s): {}", self.authors())?;
        writeln!(f, "Publish Date: {}", or_not_available(self.record.publish_date.as_ref()))?;
        writeln!(
            f,
            "Number of Pages: {}",
            or_not_available(self.record.number_of_pages.as_ref())
        )?;
        writeln!(f, "Publishers: {}", self.publishers())
    }
}


#[test]
fn record_can_be_derived_from_open_library_json() {
    let json = include_str!("../../../tests/data/open_library_book.json");
    let record: Record = serde_json::from_str(json).unwrap();
    let book = record.book().unwrap();

    assert_eq!("Code Complete", book.title().to_string());
    assert_eq!(
        "Author keys: /authors/OL240837A (Further lookup needed for names)",
        book.authors()
    );
    assert_eq!(
        Some(Scalar::Text("2004".to_owned())),
        record.publish_date
    );
    assert_eq!("Microsoft Press", book.publishers());
    assert_eq!(None, record.redirect_location());
}
