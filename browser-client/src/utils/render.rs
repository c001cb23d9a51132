//! Render step: turns a [`Session`] into view models, then into terminal text or HTML.

use crate::models::session::{Phase, ResultsHeader, ServerStatus, Session};
use relay_service::models::book::Book;
use std::fmt;

pub const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/120x160?text=No+Image";
pub const DETAIL_PLACEHOLDER: &str = "https://via.placeholder.com/150x200?text=No+Image";
pub const NO_RESULTS: &str = "No books found. Try a different search term.";
pub const MAX_CARD_CATEGORIES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub thumbnail: String,
    pub title: String,
    pub authors: String,
    pub published: String,
    pub categories: Vec<String>,
    pub rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub thumbnail: String,
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub published: String,
    pub pages: u32,
    pub language: String,
    pub categories: String,
    pub rating: Option<String>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub title: String,
    pub count_line: String,
    pub server: String,
    /// Empty means the no-results placeholder is shown instead of cards.
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub status_line: String,
    pub loading: bool,
    pub error: Option<String>,
    pub recent: Vec<String>,
    pub results: Option<ResultsView>,
    pub detail: Option<DetailView>,
}

fn thumbnail_or(book: &Book, placeholder: &str) -> String {
    if book.thumbnail.is_empty() {
        placeholder.to_string()
    } else {
        book.thumbnail.clone()
    }
}

pub fn card(book: &Book) -> CardView {
    CardView {
        id: book.id.clone(),
        thumbnail: thumbnail_or(book, CARD_PLACEHOLDER),
        title: book.title.clone(),
        authors: book.authors.join(", "),
        published: book.published_date.clone(),
        categories: book
            .categories
            .iter()
            .take(MAX_CARD_CATEGORIES)
            .cloned()
            .collect(),
        rating: book.average_rating.map(|rating| {
            format!("⭐ {} ({} reviews)", rating, book.ratings_count.unwrap_or(0))
        }),
    }
}

pub fn detail(book: &Book) -> DetailView {
    DetailView {
        thumbnail: thumbnail_or(book, DETAIL_PLACEHOLDER),
        title: book.title.clone(),
        authors: book.authors.join(", "),
        publisher: book.publisher.clone(),
        published: book.published_date.clone(),
        pages: book.page_count,
        language: book.language.clone(),
        categories: if book.categories.is_empty() {
            "Uncategorized".to_string()
        } else {
            book.categories.join(", ")
        },
        rating: book.average_rating.map(|rating| {
            format!("⭐ {}/5 ({} reviews)", rating, book.ratings_count.unwrap_or(0))
        }),
        preview_link: book.preview_link.clone(),
        info_link: book.info_link.clone(),
    }
}

pub fn results(header: &ResultsHeader, books: &[Book]) -> ResultsView {
    ResultsView {
        title: header.title.clone(),
        count_line: format!(
            "Found {} books (showing {})",
            header.total_items,
            books.len()
        ),
        server: header.server.clone(),
        cards: books.iter().map(card).collect(),
    }
}

pub fn status_line(status: &ServerStatus) -> String {
    match status {
        ServerStatus::Unknown => "Server: checking".to_string(),
        ServerStatus::Online(name) => format!("Server: {}", name),
        ServerStatus::Offline => "Server: offline".to_string(),
    }
}

pub fn page(session: &Session) -> PageView {
    PageView {
        status_line: status_line(&session.server_status),
        loading: session.phase == Phase::Loading,
        error: session.error.clone(),
        recent: session.recent.entries().to_vec(),
        results: session
            .header
            .as_ref()
            .map(|header| results(header, &session.books)),
        detail: session.detail.as_ref().map(detail),
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl CardView {
    pub fn to_html(&self) -> String {
        let categories: String = self
            .categories
            .iter()
            .map(|c| format!(r#"<span class="category-tag">{}</span>"#, escape_html(c)))
            .collect();
        let rating = self
            .rating
            .as_ref()
            .map(|r| format!(r#"<div class="book-rating">{}</div>"#, escape_html(r)))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<div class="book-card" data-id="{id}">"#,
                r#"<img src="{thumb}" alt="{title}" class="book-thumbnail" onerror="this.src='{placeholder}'">"#,
                r#"<div class="book-title">{title}</div>"#,
                r#"<div class="book-authors">by {authors}</div>"#,
                r#"<div class="book-published">{published}</div>"#,
                r#"<div class="book-categories">{categories}</div>"#,
                "{rating}</div>"
            ),
            id = escape_html(&self.id),
            thumb = escape_html(&self.thumbnail),
            title = escape_html(&self.title),
            placeholder = CARD_PLACEHOLDER,
            authors = escape_html(&self.authors),
            published = escape_html(&self.published),
            categories = categories,
            rating = rating,
        )
    }
}

impl DetailView {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<img src="{}" alt="{}" onerror="this.src='{}'"><h2>{}</h2>"#,
            escape_html(&self.thumbnail),
            escape_html(&self.title),
            DETAIL_PLACEHOLDER,
            escape_html(&self.title)
        );

        let rows = [
            ("Author(s)", self.authors.clone()),
            ("Publisher", self.publisher.clone()),
            ("Published", self.published.clone()),
            ("Pages", self.pages.to_string()),
            ("Language", self.language.clone()),
            ("Categories", self.categories.clone()),
        ];
        for (label, value) in rows {
            html.push_str(&format!(
                "<p><strong>{}:</strong> {}</p>",
                label,
                escape_html(&value)
            ));
        }

        if let Some(rating) = &self.rating {
            html.push_str(&format!(
                "<p><strong>Rating:</strong> {}</p>",
                escape_html(rating)
            ));
        }
        if let Some(link) = &self.preview_link {
            html.push_str(&format!(
                r#"<p><a href="{}" target="_blank">Preview Book</a></p>"#,
                escape_html(link)
            ));
        }
        if let Some(link) = &self.info_link {
            html.push_str(&format!(
                r#"<p><a href="{}" target="_blank">More Info</a></p>"#,
                escape_html(link)
            ));
        }

        html
    }
}

impl ResultsView {
    pub fn to_html(&self) -> String {
        let list = if self.cards.is_empty() {
            format!(r#"<p class="no-results">{}</p>"#, NO_RESULTS)
        } else {
            self.cards.iter().map(CardView::to_html).collect()
        };

        format!(
            concat!(
                r#"<section id="searchResults">"#,
                r#"<h2 id="resultsTitle">{}</h2>"#,
                r#"<p id="resultsCount">{}</p>"#,
                r#"<p id="resultsServer">{}</p>"#,
                r#"<div id="booksList">{}</div>"#,
                "</section>"
            ),
            escape_html(&self.title),
            escape_html(&self.count_line),
            escape_html(&self.server),
            list
        )
    }
}

impl PageView {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div id="serverInfo">{}</div>"#,
            escape_html(&self.status_line)
        );

        let recent: String = self
            .recent
            .iter()
            .map(|q| format!(r#"<li class="recent-item">{}</li>"#, escape_html(q)))
            .collect();
        html.push_str(&format!(r#"<ul id="recentSearches">{}</ul>"#, recent));

        if self.loading {
            html.push_str(r#"<div id="loadingIndicator">Searching...</div>"#);
        }
        if let Some(error) = &self.error {
            html.push_str(&format!(
                r#"<div id="errorMessage">{}</div>"#,
                escape_html(error)
            ));
        }
        if let Some(results) = &self.results {
            html.push_str(&results.to_html());
        }
        if let Some(detail) = &self.detail {
            html.push_str(&format!(
                r#"<div id="bookModal"><div id="bookDetails">{}</div></div>"#,
                detail.to_html()
            ));
        }

        html
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.authors, self.published)?;
        if !self.categories.is_empty() {
            write!(f, " [{}]", self.categories.join(", "))?;
        }
        if let Some(rating) = &self.rating {
            write!(f, " {}", rating)?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+-- {}", self.title)?;
        writeln!(f, "| Cover: {}", self.thumbnail)?;
        writeln!(f, "| Author(s): {}", self.authors)?;
        writeln!(f, "| Publisher: {}", self.publisher)?;
        writeln!(f, "| Published: {}", self.published)?;
        writeln!(f, "| Pages: {}", self.pages)?;
        writeln!(f, "| Language: {}", self.language)?;
        writeln!(f, "| Categories: {}", self.categories)?;
        if let Some(rating) = &self.rating {
            writeln!(f, "| Rating: {}", rating)?;
        }
        if let Some(link) = &self.preview_link {
            writeln!(f, "| Preview: {}", link)?;
        }
        if let Some(link) = &self.info_link {
            writeln!(f, "| More info: {}", link)?;
        }
        write!(f, "+-- (close to dismiss)")
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status_line)?;
        if !self.recent.is_empty() {
            let recent: Vec<String> = self
                .recent
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{}:{}", i + 1, q))
                .collect();
            writeln!(f, "Recent: {}", recent.join("  "))?;
        }
        if self.loading {
            writeln!(f, "Searching...")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "! {} (dismiss to hide)", error)?;
        }
        if let Some(results) = &self.results {
            writeln!(f, "== {} ==", results.title)?;
            writeln!(f, "{} [{}]", results.count_line, results.server)?;
            if results.cards.is_empty() {
                writeln!(f, "{}", NO_RESULTS)?;
            }
            for (i, card) in results.cards.iter().enumerate() {
                writeln!(f, "{:>2}. {}", i + 1, card)?;
            }
        }
        if let Some(detail) = &self.detail {
            writeln!(f, "{}", detail)?;
        }
        Ok(())
    }
}
