use chrono::NaiveDate;
use relay_service::models::book::Book;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    PublishedDate,
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "date" | "publisheddate" | "published" => Ok(SortKey::PublishedDate),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::PublishedDate => "publishedDate",
            SortKey::Rating => "rating",
        };
        f.write_str(name)
    }
}

/// Parses the provider's free-form `publishedDate` (`YYYY-MM-DD`, `YYYY-MM` or `YYYY`).
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01-01", raw), "%Y-%m-%d"))
        .ok()
}

fn lexical_key(value: &str) -> (String, String) {
    (value.to_lowercase(), value.to_string())
}

/// Reorders `books` in place. The sort is stable, so ties keep their relevance order.
///
/// Dates sort most recent first with unparseable dates (including `"Unknown"`) last;
/// ratings sort highest first with a missing rating counted as 0.
pub fn sort_books(books: &mut [Book], key: SortKey) {
    match key {
        SortKey::Title => books.sort_by_cached_key(|book| lexical_key(&book.title)),
        SortKey::Author => books.sort_by_cached_key(|book| lexical_key(book.first_author())),
        SortKey::PublishedDate => books.sort_by_cached_key(|book| {
            let date = parse_published_date(&book.published_date);
            (date.is_none(), Reverse(date))
        }),
        SortKey::Rating => books.sort_by(|a, b| {
            let a = a.average_rating.unwrap_or(0.0);
            let b = b.average_rating.unwrap_or(0.0);
            b.total_cmp(&a)
        }),
    }
}
