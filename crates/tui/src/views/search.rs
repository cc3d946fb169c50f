use recall_core::{MemoryRecord, SearchQuery, SearchResult};
use thiserror::Error;
use tracing::{debug, info};

use crate::request::{Command, RequestId, RequestSeq};
use crate::resource::Resource;
use crate::views::MemoryDetailView;

pub const VECTOR_PLACEHOLDER: &str = "Vector e.g. 0.1,0.2";
pub const DEFAULT_LIMIT: &str = "5";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("limit must be a whole number, got {0:?}")]
    InvalidLimit(String),
}

/// Splits on commas and keeps every token that parses as a finite float.
/// Anything else is dropped without complaint.
pub fn parse_vector(text: &str) -> Vec<f64> {
    text.split(',')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

pub fn parse_limit(text: &str) -> Result<i64, FormError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidLimit(text.to_string()))
}

/// The search form, its results, and the detail panel for the selection.
#[derive(Debug)]
pub struct SearchView {
    pub vector_input: String,
    pub limit_input: String,
    pub form_error: Option<FormError>,
    pub results: Resource<Vec<SearchResult>>,
    pub highlighted: usize,
    selected: Option<SearchResult>,
    detail: Option<MemoryDetailView>,
    pending: Option<RequestId>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            vector_input: String::new(),
            limit_input: DEFAULT_LIMIT.to_string(),
            form_error: None,
            results: Resource::Idle,
            highlighted: 0,
            selected: None,
            detail: None,
            pending: None,
        }
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.selected.as_ref()
    }

    pub fn detail(&self) -> Option<&MemoryDetailView> {
        self.detail.as_ref()
    }

    /// Validates the form and starts a search.
    pub fn submit(&mut self, seq: &mut RequestSeq) -> Result<Command, FormError> {
        let limit = match parse_limit(&self.limit_input) {
            Ok(limit) => limit,
            Err(e) => {
                debug!("Rejected search form: {}", e);
                self.form_error = Some(e.clone());
                return Err(e);
            }
        };
        self.form_error = None;

        let query = SearchQuery { vector: parse_vector(&self.vector_input), limit };
        let request = seq.next_id();
        self.pending = Some(request);
        self.results = Resource::Loading;
        Ok(Command::Search { request, query })
    }

    /// Applies a search outcome if it answers the latest submission.
    pub fn apply_search(&mut self, request: RequestId, outcome: Result<Vec<SearchResult>, String>) -> bool {
        if self.pending != Some(request) {
            debug!("Discarding stale search response {:?}", request);
            return false;
        }
        self.pending = None;
        self.highlighted = 0;

        // The selection must come from the latest response.
        let refreshed = match (&outcome, self.selected) {
            (Ok(results), Some(sel)) => results.iter().find(|r| r.id == sel.id).copied(),
            _ => None,
        };
        if refreshed.is_none() && self.selected.is_some() {
            info!("Selection no longer in results, closing detail");
            self.detail = None;
        }
        self.selected = refreshed;

        self.results = Resource::from_outcome(outcome);
        true
    }

    /// Selects the result at `index` and mounts or re-keys the detail view.
    pub fn select(&mut self, index: usize, seq: &mut RequestSeq) -> Option<Command> {
        let result = *self.results.loaded()?.get(index)?;
        self.highlighted = index;
        self.selected = Some(result);

        match self.detail.as_mut() {
            Some(detail) => detail.set_id(result.id, seq),
            None => {
                let (view, cmd) = MemoryDetailView::mount(result.id, seq);
                self.detail = Some(view);
                Some(cmd)
            }
        }
    }

    pub fn select_highlighted(&mut self, seq: &mut RequestSeq) -> Option<Command> {
        self.select(self.highlighted, seq)
    }

    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.results.loaded().map_or(0, Vec::len);
        if len == 0 {
            return;
        }
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(len - 1);
    }

    pub fn apply_memory(&mut self, request: RequestId, outcome: Result<MemoryRecord, String>) -> bool {
        match self.detail.as_mut() {
            Some(detail) => detail.apply(request, outcome),
            None => false,
        }
    }
}
