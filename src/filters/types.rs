use std::collections::BTreeSet;
use std::fmt;

use crate::models::{Gender, MealType, PropertySummary, PropertyType};

/// Amenities offered in the advanced filter panel
pub const KNOWN_AMENITIES: [&str; 10] = [
    "WiFi",
    "Attached Bathroom",
    "AC",
    "Meals Included",
    "Laundry",
    "Parking",
    "Power Backup",
    "CCTV",
    "Gym",
    "Common Area",
];

/// Property type constraint. `All` is the unfiltered default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl TypeFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All" => Some(TypeFilter::All),
            other => PropertyType::parse(other).map(TypeFilter::Only),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Only(kind) => kind.as_str(),
        }
    }
}

/// Minimum star rating, always within 0..=5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinRating(u8);

impl MinRating {
    pub const MAX: u8 = 5;

    /// Out-of-range values are clamped to 5
    pub fn new(stars: u8) -> Self {
        Self(stars.min(Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0 > 0
    }
}

/// Normalized set of search constraints applied to the listing query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub city: String,
    pub property_type: TypeFilter,
    pub gender: Gender,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub amenities: BTreeSet<String>,
    pub meal_type: Option<MealType>,
    pub min_rating: MinRating,
}

impl FilterSet {
    /// No field constrains the search. Zero price bounds count as unset.
    pub fn is_default(&self) -> bool {
        self.active_filters().is_empty()
    }

    /// Price bounds that take effect; a bound of 0 is treated as unset
    pub fn price_bounds(&self) -> (Option<u32>, Option<u32>) {
        let set = |bound: Option<u32>| bound.filter(|price| *price > 0);
        (set(self.min_price), set(self.max_price))
    }

    /// Whether the price range is well-formed. Conflicting bounds are still
    /// sent to the server unchanged.
    pub fn price_bounds_consistent(&self) -> bool {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    /// Produce a new filter set with the patch's fields laid over this one
    pub fn merge(&self, patch: FilterPatch) -> FilterSet {
        let mut next = self.clone();
        if let Some(city) = patch.city {
            next.city = city;
        }
        if let Some(property_type) = patch.property_type {
            next.property_type = property_type;
        }
        if let Some(gender) = patch.gender {
            next.gender = gender;
        }
        if let Some(min_price) = patch.min_price {
            next.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            next.max_price = max_price;
        }
        if let Some(amenities) = patch.amenities {
            next.amenities = amenities;
        }
        if let Some(meal_type) = patch.meal_type {
            next.meal_type = meal_type;
        }
        if let Some(stars) = patch.min_rating {
            next.min_rating = MinRating::new(stars);
        }
        next
    }

    /// Client-side refinement for constraints the listing endpoint does not
    /// guarantee to honour: selected amenities and minimum rating.
    pub fn admits(&self, property: &PropertySummary) -> bool {
        let has_amenities = self
            .amenities
            .iter()
            .all(|amenity| property.has_amenity(amenity));
        let rated = property.average_rating >= f32::from(self.min_rating.get());

        has_amenities && rated
    }

    /// Chips for every field that differs from its default
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();

        if !self.city.is_empty() {
            chips.push(ActiveFilter::new(FilterChip::City, self.city.clone()));
        }
        if let TypeFilter::Only(kind) = self.property_type {
            chips.push(ActiveFilter::new(FilterChip::Type, kind.as_str().to_string()));
        }
        if self.gender != Gender::Any {
            chips.push(ActiveFilter::new(
                FilterChip::Gender,
                format!("{} PG", self.gender.audience()),
            ));
        }
        let (min_price, max_price) = self.price_bounds();
        if min_price.is_some() || max_price.is_some() {
            let max = max_price
                .map(|max| max.to_string())
                .unwrap_or_else(|| "∞".to_string());
            chips.push(ActiveFilter::new(
                FilterChip::Price,
                format!("₹{} - ₹{}", min_price.unwrap_or(0), max),
            ));
        }
        for amenity in &self.amenities {
            chips.push(ActiveFilter::new(
                FilterChip::Amenity(amenity.clone()),
                amenity.clone(),
            ));
        }
        if let Some(meal) = self.meal_type {
            chips.push(ActiveFilter::new(FilterChip::MealType, meal.as_str().to_string()));
        }
        if self.min_rating.is_set() {
            chips.push(ActiveFilter::new(
                FilterChip::Rating,
                format!("{}+ stars", self.min_rating.get()),
            ));
        }

        chips
    }

    /// Copy of this set with the fields behind `chip` restored to defaults
    pub fn without(&self, chip: &FilterChip) -> FilterSet {
        let mut next = self.clone();
        match chip {
            FilterChip::City => next.city.clear(),
            FilterChip::Type => next.property_type = TypeFilter::All,
            FilterChip::Gender => next.gender = Gender::Any,
            FilterChip::Price => {
                next.min_price = None;
                next.max_price = None;
            }
            FilterChip::Amenity(name) => {
                next.amenities.remove(name);
            }
            FilterChip::MealType => next.meal_type = None,
            FilterChip::Rating => next.min_rating = MinRating::default(),
        }
        next
    }

    /// Number of advanced-panel selections (amenities, meal type, rating)
    pub fn advanced_count(&self) -> usize {
        self.amenities.len()
            + usize::from(self.meal_type.is_some())
            + usize::from(self.min_rating.is_set())
    }
}

/// Partial filter update. `None` leaves a field untouched; the nested
/// `Option`s distinguish "clear this bound" from "leave it".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub city: Option<String>,
    pub property_type: Option<TypeFilter>,
    pub gender: Option<Gender>,
    pub min_price: Option<Option<u32>>,
    pub max_price: Option<Option<u32>>,
    pub amenities: Option<BTreeSet<String>>,
    pub meal_type: Option<Option<MealType>>,
    pub min_rating: Option<u8>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn property_type(mut self, property_type: TypeFilter) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn min_price(mut self, min_price: Option<u32>) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn max_price(mut self, max_price: Option<u32>) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = Some(amenities.into_iter().map(Into::into).collect());
        self
    }

    pub fn meal_type(mut self, meal_type: Option<MealType>) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    pub fn min_rating(mut self, stars: u8) -> Self {
        self.min_rating = Some(stars);
        self
    }
}

/// A removable active-filter marker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterChip {
    City,
    Type,
    Gender,
    Price,
    Amenity(String),
    MealType,
    Rating,
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterChip::City => write!(f, "city"),
            FilterChip::Type => write!(f, "type"),
            FilterChip::Gender => write!(f, "gender"),
            FilterChip::Price => write!(f, "price"),
            FilterChip::Amenity(name) => write!(f, "amenity:{}", name),
            FilterChip::MealType => write!(f, "meal"),
            FilterChip::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for FilterChip {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "city" => Ok(FilterChip::City),
            "type" => Ok(FilterChip::Type),
            "gender" => Ok(FilterChip::Gender),
            "price" => Ok(FilterChip::Price),
            "meal" => Ok(FilterChip::MealType),
            "rating" => Ok(FilterChip::Rating),
            other => match other.strip_prefix("amenity:") {
                Some(name) if !name.is_empty() => Ok(FilterChip::Amenity(name.to_string())),
                _ => Err(format!("unknown filter chip '{}'", other)),
            },
        }
    }
}

/// A chip together with the label it is rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub chip: FilterChip,
    pub label: String,
}

impl ActiveFilter {
    fn new(chip: FilterChip, label: String) -> Self {
        Self { chip, label }
    }
}
