//! Page state and the pure transitions between its states.
//!
//! A [`Session`] moves `Idle -> Loading -> Results | Error` and can re-enter `Loading`
//! from any state. [`Session::dispatch`] applies a user [`Action`] and, when the action
//! needs the relay, hands back the [`Request`] to perform; the caller then feeds the
//! outcome to [`Session::complete`]. Nothing here touches the network or the display.

use super::history::RecentSearches;
use crate::utils::sort::{sort_books, SortKey};
use relay_service::models::book::Book;
use relay_service::models::responses::{SearchResponse, StatusResponse};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Upper bound the provider accepts for a single page.
pub const MAX_RESULTS_LIMIT: u32 = 40;

pub const CATEGORIES: [&str; 8] = [
    "Fiction",
    "Science",
    "History",
    "Biography",
    "Technology",
    "Romance",
    "Mystery",
    "Fantasy",
];

pub const SORTED_TITLE: &str = "Sorted Results";
pub const LOCAL_SORT_LABEL: &str = "Local sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    All,
    Title,
    Author,
    Subject,
}

impl SearchType {
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            SearchType::All => None,
            SearchType::Title => Some("intitle:"),
            SearchType::Author => Some("inauthor:"),
            SearchType::Subject => Some("subject:"),
        }
    }

    /// Turns the raw input into the provider query for this search type.
    pub fn apply(&self, raw: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}{}", prefix, raw),
            None => raw.to_string(),
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "subject" => Ok(SearchType::Subject),
            other => Err(format!("unknown search type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Results,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Unknown,
    Online(String),
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    IssueSearch { text: String, search_type: SearchType },
    IssueCategorySearch(String),
    SelectSort(SortKey),
    OpenDetail(String),
    CloseDetail,
    SelectRecent(usize),
    SetMaxResults(u32),
    DismissError,
}

/// Relay call a transition asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `query` carries the search-type prefix, `raw` is what the user typed.
    Search { query: String, raw: String },
    Category { category: String },
    Details { id: String },
}

impl Request {
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Request::Search { .. } => "Failed to search books",
            Request::Category { .. } => "Failed to search category",
            Request::Details { .. } => "Failed to load book details",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Page(SearchResponse),
    Book(Book),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsHeader {
    pub title: String,
    pub total_items: u64,
    pub server: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub input: String,
    pub search_type: SearchType,
    pub max_results: u32,
    pub books: Vec<Book>,
    pub header: Option<ResultsHeader>,
    pub detail: Option<Book>,
    pub error: Option<String>,
    pub recent: RecentSearches,
    pub server_status: ServerStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RecentSearches::new())
    }
}

impl Session {
    pub fn new(recent: RecentSearches) -> Self {
        Self {
            phase: Phase::Idle,
            input: String::new(),
            search_type: SearchType::All,
            max_results: DEFAULT_MAX_RESULTS,
            books: Vec::new(),
            header: None,
            detail: None,
            error: None,
            recent,
            server_status: ServerStatus::Unknown,
        }
    }

    pub fn book_id_at(&self, index: usize) -> Option<&str> {
        self.books.get(index).map(|book| book.id.as_str())
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Request> {
        match action {
            Action::IssueSearch { text, search_type } => self.begin_search(&text, search_type),
            Action::IssueCategorySearch(category) => {
                self.phase = Phase::Loading;
                Some(Request::Category { category })
            }
            Action::SelectSort(key) => {
                self.sort(key);
                None
            }
            Action::OpenDetail(id) => Some(Request::Details { id }),
            Action::CloseDetail => {
                self.detail = None;
                None
            }
            Action::SelectRecent(index) => {
                let query = self.recent.get(index)?.to_string();
                self.begin_search(&query, self.search_type)
            }
            Action::SetMaxResults(max_results) => {
                self.max_results = max_results.clamp(1, MAX_RESULTS_LIMIT);
                None
            }
            Action::DismissError => {
                self.error = None;
                if self.phase == Phase::Error {
                    self.phase = if self.header.is_some() {
                        Phase::Results
                    } else {
                        Phase::Idle
                    };
                }
                None
            }
        }
    }

    pub fn complete(&mut self, request: Request, outcome: Result<Outcome, String>) {
        match (request, outcome) {
            (request, Err(message)) => {
                self.error = Some(format!("{}: {}", request.failure_prefix(), message));
                self.phase = Phase::Error;
            }
            (Request::Search { raw, .. }, Ok(Outcome::Page(page))) => {
                self.show_results(format!("Search results for \"{}\"", raw), page);
            }
            (Request::Category { category }, Ok(Outcome::Page(page))) => {
                self.recent.add(&category);
                self.show_results(format!("Books in \"{}\" category", category), page);
            }
            (Request::Details { .. }, Ok(Outcome::Book(book))) => {
                self.detail = Some(book);
            }
            (request, Ok(_)) => {
                warn!("Ignoring mismatched relay response for {:?}", request);
            }
        }
    }

    pub fn apply_status(&mut self, status: Result<StatusResponse, String>) {
        self.server_status = match status {
            Ok(status) => ServerStatus::Online(status.server_name),
            Err(e) => {
                warn!("Relay status probe failed: {}", e);
                ServerStatus::Offline
            }
        };
    }

    fn begin_search(&mut self, text: &str, search_type: SearchType) -> Option<Request> {
        let raw = text.trim();
        if raw.is_empty() {
            return None;
        }

        self.input = raw.to_string();
        self.search_type = search_type;
        self.phase = Phase::Loading;
        self.recent.add(raw);

        Some(Request::Search {
            query: search_type.apply(raw),
            raw: raw.to_string(),
        })
    }

    fn show_results(&mut self, title: String, page: SearchResponse) {
        self.books = page.books;
        self.header = Some(ResultsHeader {
            title,
            total_items: page.total_items,
            server: page.server,
        });
        self.error = None;
        self.phase = Phase::Results;
    }

    fn sort(&mut self, key: SortKey) {
        sort_books(&mut self.books, key);
        self.header = Some(ResultsHeader {
            title: SORTED_TITLE.to_string(),
            total_items: self.books.len() as u64,
            server: LOCAL_SORT_LABEL.to_string(),
        });
        self.error = None;
        self.phase = Phase::Results;
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Results => "results",
            Phase::Error => "error",
        };
        f.write_str(name)
    }
}
