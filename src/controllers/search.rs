//! # Search Overlay
//!
//! Free-text input is debounced and de-duplicated before it reaches a controller. A settled
//! query is then classified:
//!
//! - at least `min_length` characters: search,
//! - empty: explicit clear,
//! - anything in between: hold (neither search nor clear).
//!
//! Results only narrow the list by id; the underlying collection is never replaced.

use crate::framework::{ResourceId, SearchResult};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::trace;

/// Search part of a list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub is_searching: bool,
    pub is_search_active: bool,
}

impl SearchState {
    pub fn contains(&self, id: ResourceId) -> bool {
        self.results.iter().any(|hit| hit.id == id)
    }

    /// Drops results and deactivates the overlay. The query text is left alone.
    pub fn deactivate(&mut self) {
        self.results.clear();
        self.is_searching = false;
        self.is_search_active = false;
    }
}

/// Debounce interval and minimum query length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_length: 2,
        }
    }
}

/// What a settled query asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    Search(String),
    Clear,
    Hold,
}

pub fn classify(query: &str, min_length: usize) -> QueryIntent {
    let term = query.trim();
    match term.chars().count() {
        0 => QueryIntent::Clear,
        n if n >= min_length => QueryIntent::Search(term.to_string()),
        _ => QueryIntent::Hold,
    }
}

/// Input of [`debounce_distinct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// Raw text from the search box.
    Query(String),
    /// Drops any pending value and forgets the last forwarded one.
    Reset,
}

/// Forwards queries from `input` to `output` once they have been quiet for `interval`,
/// skipping a query whose trimmed text equals the previously forwarded one.
///
/// Returns when either side closes. A value still waiting for its quiet period when the
/// input closes is dropped.
pub async fn debounce_distinct<M>(
    mut input: mpsc::UnboundedReceiver<QueryInput>,
    output: mpsc::Sender<M>,
    interval: Duration,
    wrap: fn(String) -> M,
) {
    let mut last: Option<String> = None;
    let mut pending: Option<String> = None;

    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(QueryInput::Query(value)) => pending = Some(value),
                Some(QueryInput::Reset) => last = None,
                None => return,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(QueryInput::Query(newer)) => pending = Some(newer),
                Some(QueryInput::Reset) => {
                    trace!(query = %value, "Pending query reset");
                    last = None;
                }
                None => return,
            },
            _ = tokio::time::sleep(interval) => {
                let key = value.trim();
                if last.as_deref() == Some(key) {
                    trace!(query = %value, "Duplicate query suppressed");
                    continue;
                }
                last = Some(key.to_string());
                if output.send(wrap(value)).await.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_distinguishes_clear_from_hold() {
        assert_eq!(classify("", 2), QueryIntent::Clear);
        assert_eq!(classify("   ", 2), QueryIntent::Clear);
        assert_eq!(classify("a", 2), QueryIntent::Hold);
        assert_eq!(classify(" ab ", 2), QueryIntent::Search("ab".into()));
        assert_eq!(classify("ab", 4), QueryIntent::Hold);
    }

    #[test]
    fn deactivate_keeps_query() {
        let mut state = SearchState {
            query: "rust".into(),
            results: vec![SearchResult {
                id: 1,
                title: "Rust".into(),
                subtitle: None,
                status: None,
            }],
            is_searching: false,
            is_search_active: true,
        };
        assert!(state.contains(1));
        state.deactivate();
        assert_eq!(state.query, "rust");
        assert!(state.results.is_empty());
        assert!(!state.is_search_active);
    }

    fn pipeline() -> (mpsc::UnboundedSender<QueryInput>, mpsc::Receiver<String>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::channel(8);
        tokio::spawn(debounce_distinct(
            input_rx,
            output_tx,
            Duration::from_millis(300),
            |q| q,
        ));
        (input_tx, output_rx)
    }

    fn query(text: &str) -> QueryInput {
        QueryInput::Query(text.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (input, mut output) = pipeline();
        for q in ["a", "ab", "ab", "abc"] {
            input.send(QueryInput::Query(q.to_string())).unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(output.try_recv().unwrap(), "abc");
        assert!(output.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_duplicate_is_suppressed() {
        let (input, mut output) = pipeline();
        input.send(query("ab")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(output.try_recv().unwrap(), "ab");

        input.send(query("abc")).unwrap();
        input.send(query("ab")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(output.try_recv().is_err());

        input.send(query("abd")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(output.try_recv().unwrap(), "abd");
    }

    #[tokio::test(start_paused = true)]
    async fn surrounding_whitespace_counts_as_duplicate() {
        let (input, mut output) = pipeline();
        input.send(query("ab")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(output.try_recv().unwrap(), "ab");

        input.send(query("ab ")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(output.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_forgets_last_and_drops_pending() {
        let (input, mut output) = pipeline();
        input.send(query("rust")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(output.try_recv().unwrap(), "rust");

        input.send(query("rus")).unwrap();
        input.send(QueryInput::Reset).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(output.try_recv().is_err());

        input.send(query("rust")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(output.try_recv().unwrap(), "rust");
    }
}
