use indexmap::IndexSet;
use tracing::{debug, error};

use crate::{
    core::{
        api::{ApiResult, FeedbackApi},
        session::{Session, SessionStore},
        workflow::sequence::{Sequencer, Ticket},
    },
    models::{Feedback, FeedbackPage, PAGE_SIZE},
};

/// Mean rating of the given page, `0.0` for an empty page.
///
/// This is a page-local figure: it only ever sees the rows currently loaded,
/// never the whole filtered result set.
pub fn page_average(feedbacks: &[Feedback]) -> f64 {
    if feedbacks.is_empty() {
        return 0.0;
    }
    let total: u32 = feedbacks.iter().map(|f| u32::from(f.rating)).sum();
    f64::from(total) / feedbacks.len() as f64
}

/// Subjects on the page, de-duplicated in order of first appearance.
pub fn distinct_subjects(feedbacks: &[Feedback]) -> Vec<String> {
    feedbacks
        .iter()
        .map(|f| f.subject.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CheckingAuth,
    /// Terminal: the shell should show the login view instead.
    Unauthenticated,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    Initial,
    FilterChange,
    PageChange,
}

/// A page fetch the dashboard wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: Ticket,
    pub reason: FetchReason,
    pub subject: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub async fn fetch<A: FeedbackApi>(&self, api: &A) -> ApiResult<FeedbackPage> {
        match &self.subject {
            Some(subject) => {
                api.list_feedbacks_by_subject(subject, self.page, self.limit)
                    .await
            }
            None => api.list_feedbacks(self.page, self.limit).await,
        }
    }
}

/// What [`Dashboard::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Admin listing state: auth gate, subject filter, pagination and the
/// page-local average.
///
/// Each fetch is issued as a [`PageRequest`] carrying a ticket. Only the
/// response to the most recent ticket is applied, so a slow earlier fetch can
/// never overwrite a faster later one.
#[derive(Debug, Clone)]
pub struct Dashboard {
    phase: Phase,
    feedbacks: Vec<Feedback>,
    subjects: Vec<String>,
    selected_subject: Option<String>,
    current_page: u32,
    total_pages: u32,
    average_rating: f64,
    error: Option<String>,
    sequencer: Sequencer,
    /// Reason of the most recently issued request, reused on reload.
    last_reason: FetchReason,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            phase: Phase::CheckingAuth,
            feedbacks: Vec::new(),
            subjects: Vec::new(),
            selected_subject: None,
            current_page: 1,
            total_pages: 1,
            average_rating: 0.0,
            error: None,
            sequencer: Sequencer::default(),
            last_reason: FetchReason::Initial,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the auth check. Returns the initial page request when the
    /// session is an admin one; otherwise the dashboard becomes unusable.
    pub fn enter<S: SessionStore>(&mut self, session: &Session<S>) -> Option<PageRequest> {
        if !session.is_authenticated() {
            self.phase = Phase::Unauthenticated;
            return None;
        }
        Some(self.request(FetchReason::Initial))
    }

    /// Switches the subject filter; an empty string means all subjects.
    /// Always goes back to page 1.
    pub fn select_subject(&mut self, subject: &str) -> Option<PageRequest> {
        if !self.is_authenticated() {
            return None;
        }
        let subject = subject.trim();
        self.selected_subject = (!subject.is_empty()).then(|| subject.to_string());
        self.current_page = 1;
        Some(self.request(FetchReason::FilterChange))
    }

    /// Moves to `page`, keeping the current filter. Pages outside
    /// `1..=total_pages` are ignored.
    pub fn change_page(&mut self, page: u32) -> Option<PageRequest> {
        if !self.is_authenticated() || page == 0 || page > self.total_pages {
            return None;
        }
        self.current_page = page;
        Some(self.request(FetchReason::PageChange))
    }

    /// Re-issues the last request, e.g. after an error. A retried filter
    /// change still recomputes the average and a retried initial load still
    /// refreshes the subjects.
    pub fn reload(&mut self) -> Option<PageRequest> {
        if !self.is_authenticated() {
            return None;
        }
        Some(self.request(self.last_reason))
    }

    /// Feeds a fetch outcome back in. The loading state always resolves for
    /// the latest request, whether it succeeded or not.
    pub fn apply(&mut self, request: &PageRequest, result: ApiResult<FeedbackPage>) -> Applied {
        if !self.sequencer.is_latest(request.ticket) {
            debug!(ticket = request.ticket.value(), "Discarding stale feedback page");
            return Applied::Stale;
        }
        self.phase = Phase::Loaded;
        match result {
            Ok(page) => {
                self.total_pages = page.total_pages.max(1);
                self.current_page = self.current_page.min(self.total_pages);
                self.feedbacks = page.feedbacks;
                self.error = None;
                match request.reason {
                    FetchReason::Initial => self.subjects = distinct_subjects(&self.feedbacks),
                    FetchReason::FilterChange => {
                        self.average_rating = page_average(&self.feedbacks)
                    }
                    // unfiltered paging goes through the same fetch as the initial load
                    FetchReason::PageChange if request.subject.is_none() => {
                        self.subjects = distinct_subjects(&self.feedbacks)
                    }
                    FetchReason::PageChange => {}
                }
                Applied::Updated
            }
            Err(e) => {
                error!("Error fetching feedbacks: {e}");
                self.error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    /// Performs `request` against `api` and applies the result.
    pub async fn load<A: FeedbackApi>(&mut self, api: &A, request: PageRequest) -> Applied {
        let result = request.fetch(api).await;
        self.apply(&request, result)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::CheckingAuth | Phase::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Loaded)
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.feedbacks
    }

    /// Filter options, taken from the most recently loaded unfiltered page only.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn selected_subject(&self) -> Option<&str> {
        self.selected_subject.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page-local average, refreshed only when the filter changes.
    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn request(&mut self, reason: FetchReason) -> PageRequest {
        self.phase = Phase::Loading;
        self.last_reason = reason;
        PageRequest {
            ticket: self.sequencer.issue(),
            reason,
            subject: self.selected_subject.clone(),
            page: self.current_page,
            limit: PAGE_SIZE,
        }
    }
}
