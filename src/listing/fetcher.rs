use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::{PropertyApi, RequestParams};
use crate::filters::FilterSet;
use crate::models::PropertySummary;

pub const LOAD_FAILED: &str = "Failed to load properties";

/// What the result area currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListingState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<PropertySummary>),
    /// Message for the error panel; its retry button re-runs the fetch
    Failed(String),
}

impl ListingState {
    pub fn results(&self) -> &[PropertySummary] {
        match self {
            ListingState::Loaded(results) => results,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListingState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListingState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Displayed { count: usize },
    Failed { message: String },
    /// A newer fetch was issued while this one was in flight
    Superseded,
}

/// Fetches listings for a filter set and swaps them into the display state.
///
/// Each call takes the next number from a counter before it goes out. A
/// response is applied only if its number is still the latest issued, so a
/// slow early request can never overwrite the results of a later one.
pub struct ResultFetcher<A: ?Sized> {
    api: Arc<A>,
    issued: AtomicU64,
    state: Mutex<ListingState>,
}

impl<A: PropertyApi + ?Sized> ResultFetcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            issued: AtomicU64::new(0),
            state: Mutex::new(ListingState::Idle),
        }
    }

    pub async fn fetch(&self, filters: &FilterSet) -> FetchOutcome {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock_state() = ListingState::Loading;

        let params = RequestParams::from_filters(filters);
        debug!(token, ?params, "fetching properties");
        let response = self.api.list_properties(&params).await;

        let mut state = self.lock_state();
        if self.issued.load(Ordering::SeqCst) != token {
            debug!(token, "discarding superseded response");
            return FetchOutcome::Superseded;
        }

        match response {
            Ok(records) => {
                let total = records.len();
                let results: Vec<PropertySummary> = records
                    .into_iter()
                    .filter(|property| filters.admits(property))
                    .collect();
                info!("Showing {} of {} properties", results.len(), total);

                let count = results.len();
                *state = ListingState::Loaded(results);
                FetchOutcome::Displayed { count }
            }
            Err(err) => {
                warn!("Error fetching properties: {}", err);
                let message = err.user_message(LOAD_FAILED);
                *state = ListingState::Failed(message.clone());
                FetchOutcome::Failed { message }
            }
        }
    }

    pub fn state(&self) -> ListingState {
        self.lock_state().clone()
    }

    pub fn results(&self) -> Vec<PropertySummary> {
        self.lock_state().results().to_vec()
    }

    /// Number of fetches issued so far
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> MutexGuard<'_, ListingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::filters::FilterPatch;
    use crate::testing::{listing, FakeApi};

    fn in_city(city: &str) -> FilterSet {
        FilterSet::default().merge(FilterPatch::new().city(city))
    }

    #[tokio::test]
    async fn test_late_response_from_earlier_request_is_discarded() {
        let api = Arc::new(FakeApi::default());
        let release_a = api.gate("Mandi");
        let release_b = api.gate("Shimla");
        let fetcher = ResultFetcher::new(api.clone());

        let (filters_a, filters_b) = (in_city("Mandi"), in_city("Shimla"));
        let resolve_b_then_a = async {
            assert!(fetcher.state().is_loading());
            tokio::task::yield_now().await;
            release_b.send(Ok(vec![listing(2, "Shimla")])).unwrap();
            tokio::task::yield_now().await;
            release_a.send(Ok(vec![listing(1, "Mandi")])).unwrap();
        };

        let (a, b, ()) = tokio::join!(
            fetcher.fetch(&filters_a),
            fetcher.fetch(&filters_b),
            resolve_b_then_a
        );

        assert_eq!(a, FetchOutcome::Superseded);
        assert_eq!(b, FetchOutcome::Displayed { count: 1 });
        let results = fetcher.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city, "Shimla");
        assert_eq!(fetcher.issued(), 2);
    }

    #[tokio::test]
    async fn test_late_error_from_earlier_request_is_discarded() {
        let api = Arc::new(FakeApi::default());
        let release_a = api.gate("Mandi");
        let release_b = api.gate("Delhi");
        let fetcher = ResultFetcher::new(api.clone());

        let (filters_a, filters_b) = (in_city("Mandi"), in_city("Delhi"));
        let resolve = async {
            tokio::task::yield_now().await;
            release_b.send(Ok(vec![listing(5, "Delhi")])).unwrap();
            tokio::task::yield_now().await;
            release_a
                .send(Err(ApiError::Network("timed out".into())))
                .unwrap();
        };

        let (a, _, ()) = tokio::join!(fetcher.fetch(&filters_a), fetcher.fetch(&filters_b), resolve);

        assert_eq!(a, FetchOutcome::Superseded);
        assert_eq!(fetcher.state().error(), None);
        assert_eq!(fetcher.results()[0].id, 5);
    }

    #[tokio::test]
    async fn test_results_are_replaced_wholesale() {
        let api = Arc::new(FakeApi::with_listings(vec![listing(1, "Mandi"), listing(2, "Mandi")]));
        let fetcher = ResultFetcher::new(api.clone());

        fetcher.fetch(&FilterSet::default()).await;
        assert_eq!(fetcher.results().len(), 2);

        api.fail_listing(Some(ApiError::Rejected {
            status: 500,
            message: None,
        }));
        let outcome = fetcher.fetch(&FilterSet::default()).await;

        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                message: LOAD_FAILED.to_string()
            }
        );
        assert!(fetcher.results().is_empty());
        assert_eq!(fetcher.state().error(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_refines_by_amenity_and_rating() {
        let mut rated = listing(1, "Mandi");
        rated.average_rating = 4.6;
        rated.amenities.push("Gym".to_string());
        let plain = listing(2, "Mandi");
        let api = Arc::new(FakeApi::with_listings(vec![rated, plain]));
        let fetcher = ResultFetcher::new(api.clone());

        let filters = FilterSet::default().merge(FilterPatch::new().amenities(["Gym"]).min_rating(4));
        let outcome = fetcher.fetch(&filters).await;

        assert_eq!(outcome, FetchOutcome::Displayed { count: 1 });
        assert_eq!(fetcher.results()[0].id, 1);
        assert_eq!(api.list_calls()[0].get("amenities"), Some("Gym"));
    }

    #[tokio::test]
    async fn test_fetch_runs_on_spawned_tasks() {
        let api = Arc::new(FakeApi::with_listings(vec![listing(1, "Mandi")]));
        let fetcher = Arc::new(ResultFetcher::new(api));

        let task = {
            let fetcher = Arc::clone(&fetcher);
            tokio::spawn(async move { fetcher.fetch(&FilterSet::default()).await })
        };

        assert_eq!(task.await.unwrap(), FetchOutcome::Displayed { count: 1 });
    }
}
