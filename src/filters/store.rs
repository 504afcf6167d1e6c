use std::sync::Arc;

use tracing::debug;

use super::types::{ActiveFilter, FilterChip, FilterPatch, FilterSet, MinRating};

/// Holds the current filter set. Every change swaps in a new immutable
/// value; readers holding an earlier snapshot keep seeing it unchanged.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    current: Arc<FilterSet>,
}

impl FilterStore {
    pub fn new(initial: FilterSet) -> Self {
        Self {
            current: Arc::new(initial),
        }
    }

    pub fn current(&self) -> &FilterSet {
        &self.current
    }

    /// Shared handle to the current value
    pub fn snapshot(&self) -> Arc<FilterSet> {
        Arc::clone(&self.current)
    }

    pub fn update(&mut self, patch: FilterPatch) -> &FilterSet {
        let next = self.current.merge(patch);
        self.replace(next)
    }

    pub fn replace(&mut self, filters: FilterSet) -> &FilterSet {
        debug!(?filters, "filters replaced");
        self.current = Arc::new(filters);
        &self.current
    }

    pub fn reset(&mut self) -> &FilterSet {
        self.replace(FilterSet::default())
    }

    pub fn remove(&mut self, chip: &FilterChip) -> &FilterSet {
        let next = self.current.without(chip);
        self.replace(next)
    }

    pub fn toggle_amenity(&mut self, amenity: &str) -> &FilterSet {
        let mut next = (*self.current).clone();
        if !next.amenities.remove(amenity) {
            next.amenities.insert(amenity.to_string());
        }
        self.replace(next)
    }

    /// Clear amenities, meal type and rating, keeping the search bar fields
    pub fn reset_advanced(&mut self) -> &FilterSet {
        let mut next = (*self.current).clone();
        next.amenities.clear();
        next.meal_type = None;
        next.min_rating = MinRating::default();
        self.replace(next)
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.current.active_filters()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.current.active_filters().is_empty()
    }

    pub fn advanced_count(&self) -> usize {
        self.current.advanced_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = FilterStore::default();
        store.update(FilterPatch::new().city("Mumbai").min_rating(4));
        assert!(store.has_active_filters());

        store.reset();
        assert_eq!(*store.current(), FilterSet::default());
        assert!(!store.has_active_filters());
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let mut store = FilterStore::default();
        let before = store.snapshot();
        store.update(FilterPatch::new().city("Shimla"));

        assert_eq!(before.city, "");
        assert_eq!(store.current().city, "Shimla");
    }

    #[test]
    fn test_toggle_amenity() {
        let mut store = FilterStore::default();
        store.toggle_amenity("WiFi");
        store.toggle_amenity("Gym");
        assert_eq!(store.advanced_count(), 2);

        store.toggle_amenity("WiFi");
        assert_eq!(
            store.current().amenities.iter().collect::<Vec<_>>(),
            vec!["Gym"]
        );
    }

    #[test]
    fn test_reset_advanced_keeps_search_bar_fields() {
        let mut store = FilterStore::default();
        store.update(
            FilterPatch::new()
                .city("Chandigarh")
                .min_price(Some(5000))
                .amenities(["AC", "CCTV"])
                .meal_type(Some(MealType::Both))
                .min_rating(2),
        );

        store.reset_advanced();

        assert_eq!(store.current().city, "Chandigarh");
        assert_eq!(store.current().min_price, Some(5000));
        assert_eq!(store.advanced_count(), 0);
    }
}
