use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use stay_finder::booking::{BookingError, BookingForm, BookingState, SubmitOutcome};
use stay_finder::filters::{search_link, FilterChip, FilterPatch, KNOWN_AMENITIES};
use stay_finder::listing::{featured_properties, ListingState, SearchSession, FEATURED_COUNT};
use stay_finder::models::{Booking, MealType, PropertySummary};
use stay_finder::services::{LogNavigator, Route, TokenSession};
use stay_finder::{Config, HttpPropertyApi, PropertyApi};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stay-finder", version, about = "Search PG and guest house listings and request bookings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search listings, starting from a listing-page query string
    Search {
        /// e.g. "?city=Shimla&type=PG"
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        min_price: Option<u32>,
        #[arg(long)]
        max_price: Option<u32>,
        #[arg(long = "amenity")]
        amenities: Vec<String>,
        /// Veg, Non-Veg or Both
        #[arg(long)]
        meal: Option<String>,
        #[arg(long)]
        min_rating: Option<u8>,
        /// Drop a filter seeded from the query: city, type, gender, price, meal, rating or amenity:<name>
        #[arg(long)]
        remove: Vec<FilterChip>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Search again once if loading fails
        #[arg(long)]
        retry: bool,
    },
    /// Listings shown on the landing page
    Featured,
    /// Show one listing
    Show { id: u64 },
    /// Request a booking
    Book {
        property: u64,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
    },
    /// List your bookings
    Bookings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let api = Arc::new(HttpPropertyApi::new(&config)?);

    match cli.command {
        Command::Search {
            query,
            min_price,
            max_price,
            amenities,
            meal,
            min_rating,
            remove,
            json,
            retry,
        } => {
            let mut patch = FilterPatch::new();
            if min_price.is_some() {
                patch = patch.min_price(min_price);
            }
            if max_price.is_some() {
                patch = patch.max_price(max_price);
            }
            if !amenities.is_empty() {
                for amenity in &amenities {
                    if !KNOWN_AMENITIES.iter().any(|known| known.eq_ignore_ascii_case(amenity)) {
                        warn!("'{}' is not one of the listed amenities", amenity);
                    }
                }
                patch = patch.amenities(amenities);
            }
            if let Some(meal) = meal {
                let meal = MealType::parse(&meal).with_context(|| format!("Unknown meal type '{}'", meal))?;
                patch = patch.meal_type(Some(meal));
            }
            if let Some(stars) = min_rating {
                patch = patch.min_rating(stars);
            }

            let mut session = SearchSession::open(api, &query).await;
            if patch != FilterPatch::default() {
                session.apply(patch).await;
            }
            for chip in &remove {
                session.remove_filter(chip).await;
            }

            if retry && session.state().error().is_some() {
                session.retry().await;
            }

            match session.state() {
                ListingState::Loaded(properties) => {
                    let chips: Vec<String> = session.active_filters().into_iter().map(|f| f.label).collect();
                    if !chips.is_empty() {
                        info!("Active filters: {}", chips.join(", "));
                    }
                    info!("Listing page: {}", Route::Listing(search_link(session.filters())));
                    if json {
                        println!("{}", serde_json::to_string_pretty(&properties)?);
                    } else {
                        print_properties(&properties);
                    }
                }
                ListingState::Failed(message) => anyhow::bail!(message),
                other => anyhow::bail!("Search did not complete: {:?}", other),
            }
        }
        Command::Featured => {
            let featured = featured_properties(api.as_ref(), FEATURED_COUNT)
                .await
                .context("Failed to load featured properties")?;
            print_properties(&featured);
        }
        Command::Show { id } => {
            let detail = api
                .get_property(id)
                .await
                .with_context(|| format!("Failed to load property {}", id))?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Book {
            property,
            check_in,
            check_out,
        } => {
            let mut form = BookingForm::new(property).with_redirect_delay(config.redirect_delay);
            form.set_dates(&check_in, &check_out)?;
            let auth = TokenSession::new(config.token.clone());
            let today = Utc::now().date_naive();

            match form.submit(api.as_ref(), &auth, today).await {
                Ok(SubmitOutcome::LoginRequired(redirect)) => {
                    warn!("Not signed in, set STAY_FINDER_TOKEN to book");
                    redirect.follow(&LogNavigator).await;
                }
                Ok(SubmitOutcome::Requested { booking, redirect }) => {
                    info!("Booking request sent! The owner will confirm your booking soon.");
                    print_bookings(std::slice::from_ref(&booking));
                    redirect.follow(&LogNavigator).await;
                }
                Err(BookingError::Api(err)) => match form.state() {
                    BookingState::Error(message) => anyhow::bail!(message.clone()),
                    _ => return Err(err.into()),
                },
                Err(err) => return Err(err.into()),
            }
        }
        Command::Bookings => {
            let bookings = api.my_bookings().await.context("Failed to load bookings")?;
            print_bookings(&bookings);
        }
    }

    Ok(())
}

fn print_properties(properties: &[PropertySummary]) {
    info!("✅ {} properties found\n", properties.len());

    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} (₹{}/month)", i + 1, property.title, property.price_per_month);
        println!(
            "   {} {} in {}",
            property.gender.audience(),
            property.property_type.as_str(),
            property.city
        );
        println!("   {} beds available", property.available_beds);
        if property.review_count > 0 {
            println!(
                "   Rated {:.1} ({} reviews)",
                property.average_rating, property.review_count
            );
        }
        println!("   ID: {}", property.id);
        if let Some(image) = property.cover_image() {
            println!("   Photo: {}", image);
        }
        println!("   Amenities: {}", property.amenities.join(", "));
        println!();
    }
}

fn print_bookings(bookings: &[Booking]) {
    for booking in bookings {
        let title = booking
            .property
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("Property");
        println!("#{} {} [{:?}]", booking.id, title, booking.status);
        println!(
            "   {} → {} ({} nights)",
            booking.check_in_date,
            booking.check_out_date,
            booking.nights()
        );
        println!();
    }
}
