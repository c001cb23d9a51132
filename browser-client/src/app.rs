use crate::models::session::{Action, Outcome, Request, Session};
use crate::services::history_store::HistoryStore;
use crate::services::relay::RelayClient;
use crate::utils::render::{self, PageView};
use tracing::warn;

/// Dispatcher: owns the session, performs the relay calls its transitions ask for and
/// persists the recent-search list whenever it changes.
pub struct App<S: HistoryStore> {
    relay: RelayClient,
    store: S,
    session: Session,
}

impl<S: HistoryStore> App<S> {
    pub fn new(relay: RelayClient, store: S) -> Self {
        let session = Session::new(store.load());
        Self {
            relay,
            store,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn render(&self) -> PageView {
        render::page(&self.session)
    }

    /// Best-effort identity check against the relay.
    pub async fn probe_status(&mut self) {
        let status = self.relay.status().await.map_err(|e| e.to_string());
        self.session.apply_status(status);
    }

    pub async fn dispatch(&mut self, action: Action) {
        let recent_before = self.session.recent.clone();

        if let Some(request) = self.session.dispatch(action) {
            let outcome = self.perform(&request).await;
            self.session.complete(request, outcome);
        }

        if self.session.recent != recent_before {
            if let Err(e) = self.store.save(&self.session.recent) {
                warn!("Failed to persist recent searches: {}", e);
            }
        }
    }

    async fn perform(&self, request: &Request) -> Result<Outcome, String> {
        let max_results = self.session.max_results;

        let outcome = match request {
            Request::Search { query, .. } => self
                .relay
                .search(query, max_results)
                .await
                .map(Outcome::Page),
            Request::Category { category } => self
                .relay
                .search_category(category, max_results)
                .await
                .map(Outcome::Page),
            Request::Details { id } => self.relay.details(id).await.map(Outcome::Book),
        };

        outcome.map_err(|e| e.to_string())
    }
}
