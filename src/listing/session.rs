use std::sync::Arc;

use tracing::info;

use super::fetcher::{FetchOutcome, ListingState, ResultFetcher};
use crate::api::PropertyApi;
use crate::filters::{filters_from_query, ActiveFilter, FilterChip, FilterPatch, FilterSet, FilterStore};
use crate::models::PropertySummary;

/// Listing page controller: the filter store and the result fetcher kept
/// in step. Every user action below issues exactly one fetch.
pub struct SearchSession<A: ?Sized> {
    store: FilterStore,
    fetcher: Arc<ResultFetcher<A>>,
}

impl<A: PropertyApi + ?Sized> SearchSession<A> {
    pub fn new(api: Arc<A>, initial: FilterSet) -> Self {
        Self {
            store: FilterStore::new(initial),
            fetcher: Arc::new(ResultFetcher::new(api)),
        }
    }

    /// Seed filters from the page's query string and load the first results
    pub async fn open(api: Arc<A>, query: &str) -> Self {
        let initial = filters_from_query(query);
        info!("Opening listing with {} active filters", initial.active_filters().len());

        let session = Self::new(api, initial);
        session.refresh().await;
        session
    }

    /// Re-run the search for the current filters
    pub async fn refresh(&self) -> FetchOutcome {
        let filters = self.store.snapshot();
        self.fetcher.fetch(&filters).await
    }

    /// Retry action of the error panel
    pub async fn retry(&self) -> FetchOutcome {
        info!("Retrying property search");
        self.refresh().await
    }

    /// Submit of the search bar or the advanced filter panel
    pub async fn apply(&mut self, patch: FilterPatch) -> FetchOutcome {
        self.store.update(patch);
        self.refresh().await
    }

    pub async fn search(&mut self, filters: FilterSet) -> FetchOutcome {
        self.store.replace(filters);
        self.refresh().await
    }

    pub async fn reset(&mut self) -> FetchOutcome {
        self.store.reset();
        self.refresh().await
    }

    pub async fn reset_advanced(&mut self) -> FetchOutcome {
        self.store.reset_advanced();
        self.refresh().await
    }

    /// Close button on a single active-filter chip
    pub async fn remove_filter(&mut self, chip: &FilterChip) -> FetchOutcome {
        self.store.remove(chip);
        self.refresh().await
    }

    pub fn filters(&self) -> &FilterSet {
        self.store.current()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.store.active_filters()
    }

    pub fn state(&self) -> ListingState {
        self.fetcher.state()
    }

    pub fn results(&self) -> Vec<PropertySummary> {
        self.fetcher.results()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::filters::TypeFilter;
    use crate::models::PropertyType;
    use crate::testing::{listing, FakeApi};

    #[tokio::test]
    async fn test_open_seeds_from_query() {
        let api = Arc::new(FakeApi::with_listings(vec![listing(1, "Shimla")]));
        let session = SearchSession::open(api.clone(), "?city=Shimla&type=PG").await;

        assert_eq!(session.filters().city, "Shimla");
        assert_eq!(session.filters().property_type, TypeFilter::Only(PropertyType::Pg));

        let calls = api.list_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("city"), Some("Shimla"));
        assert_eq!(calls[0].get("type"), Some("PG"));
        assert_eq!(calls[0].get("gender"), None);
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_fetches_once_with_defaults() {
        let api = Arc::new(FakeApi::default());
        let mut session = SearchSession::new(api.clone(), FilterSet::default());

        session
            .apply(FilterPatch::new().city("Mumbai").min_rating(4))
            .await;
        let before = api.list_calls().len();

        session.reset().await;

        assert_eq!(*session.filters(), FilterSet::default());
        let calls = api.list_calls();
        assert_eq!(calls.len(), before + 1);
        assert!(calls.last().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_removing_price_chip() {
        let api = Arc::new(FakeApi::default());
        let mut session = SearchSession::new(api.clone(), FilterSet::default());
        session
            .apply(
                FilterPatch::new()
                    .city("Mandi")
                    .min_price(Some(3000))
                    .max_price(Some(8000)),
            )
            .await;

        session.remove_filter(&FilterChip::Price).await;

        assert_eq!(session.filters().city, "Mandi");
        assert_eq!(session.filters().min_price, None);
        assert_eq!(session.filters().max_price, None);
        let last = api.list_calls().pop().unwrap();
        assert_eq!(last.get("city"), Some("Mandi"));
        assert_eq!(last.get("minPrice"), None);
        assert_eq!(last.get("maxPrice"), None);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let api = Arc::new(FakeApi::with_listings(vec![listing(3, "Delhi")]));
        api.fail_listing(Some(ApiError::Network("connection reset".into())));
        let session = SearchSession::open(api.clone(), "").await;
        assert!(session.state().error().is_some());

        api.fail_listing(None);
        let outcome = session.retry().await;

        assert_eq!(outcome, FetchOutcome::Displayed { count: 1 });
        assert_eq!(api.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_advanced_keeps_search_bar() {
        let api = Arc::new(FakeApi::default());
        let mut session = SearchSession::open(api.clone(), "?city=Mandi").await;
        session
            .apply(FilterPatch::new().amenities(["WiFi"]).min_rating(4))
            .await;

        session.reset_advanced().await;

        assert_eq!(session.filters().city, "Mandi");
        assert_eq!(session.filters().advanced_count(), 0);
        let last = api.list_calls().pop().unwrap();
        assert_eq!(last.get("city"), Some("Mandi"));
        assert_eq!(last.get("amenities"), None);
        assert_eq!(last.get("minRating"), None);
        assert_eq!(api.list_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_edits_keep_query_filters() {
        let api = Arc::new(FakeApi::default());
        let mut session = SearchSession::open(api.clone(), "?gender=Female").await;

        session.apply(FilterPatch::new().max_price(Some(7000))).await;

        let labels: Vec<String> = session.active_filters().into_iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Girls PG", "₹0 - ₹7000"]);
    }
}
