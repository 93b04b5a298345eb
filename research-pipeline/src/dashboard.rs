use crate::orchestrator::{SearchOrchestrator, SearchOutcome, SearchRequest};
use crate::result_set::ResultSet;
use crate::session::Session;
use gummy_core::{Classifier, CoreError, LinkSummary, PostSource, Summarizer};
use tracing::info;
use url::Url;

/// Accepts only absolute `http`/`https` URLs with a host.
pub fn validate_url(input: &str) -> Result<Url, CoreError> {
    let input = input.trim();
    let lowered = input.to_ascii_lowercase();
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        return Err(CoreError::invalid_input(
            "enter a valid URL starting with http:// or https://",
        ));
    }

    let url = Url::parse(input)
        .map_err(|e| CoreError::invalid_input(format!("'{}' is not a valid URL: {}", input, e)))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(CoreError::invalid_input(format!("'{}' has no host", input)));
    }
    Ok(url)
}

/// Front door for one interactive user: runs searches and link analyses and
/// keeps their outcome in the [`Session`].
pub struct Dashboard<S, C, L> {
    orchestrator: SearchOrchestrator<S, C>,
    summarizer: L,
    session: Session,
}

impl<S, C, L> Dashboard<S, C, L>
where
    S: PostSource,
    C: Classifier,
    L: Summarizer,
{
    pub fn new(orchestrator: SearchOrchestrator<S, C>, summarizer: L) -> Self {
        let session = Session::new();
        info!("Started session {}", session.id());
        Self {
            orchestrator,
            summarizer,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator<S, C> {
        &self.orchestrator
    }

    /// Runs a search and makes its results current. `Ok(None)` means nothing
    /// was found at all.
    pub async fn search(&mut self, request: &SearchRequest) -> Result<Option<&ResultSet>, CoreError> {
        let outcome = self.orchestrator.search(request).await?;
        self.session.record(&request.query);

        let results = match outcome {
            SearchOutcome::NoResults => None,
            SearchOutcome::Results(results) => Some(results),
        };
        self.session.set_results(results);
        Ok(self.session.results())
    }

    /// Summarizes a link and makes the summary current.
    pub async fn analyze_link(&mut self, input: &str) -> Result<&LinkSummary, CoreError> {
        let url = validate_url(input)?;
        self.session.record(input);

        info!("Analyzing link {}", url);
        let summary = self.summarizer.summarize(url.as_str()).await;
        self.session.set_summary(summary);

        self.session
            .summary()
            .ok_or_else(|| CoreError::Internal {
                message: "summary missing right after it was stored".to_string(),
            })
    }

    /// Drops the active filters on the current results, if any.
    pub fn show_all(&mut self) -> Option<&ResultSet> {
        let results = self.session.results_mut()?;
        results.show_all();
        Some(&*results)
    }
}
