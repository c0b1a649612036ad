//! Walkthrough of both StayLink dashboards, in-process
//!
//! - Traveller: log in, search, open a hotel, try to book without dates, book
//! - Owner: log in, list properties, submit an incomplete form, add a property
//! Run: cargo run --bin demo_flow

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use staylink::auth::{authorize, UserDirectory};
use staylink::catalog::Catalog;
use staylink::flow::{OwnerDashboard, TravellerFlow};
use staylink::models::Role;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Low bcrypt cost: this is a local walkthrough
    let users = UserDirectory::demo(4)?;

    // --- Traveller ---
    let traveller = users.login("traveller@example.com", "password123")?;
    authorize(Some(&traveller), Some(Role::Traveller))?;
    println!("✅ Welcome back, {}!", traveller.name);

    let mut flow = TravellerFlow::new(Catalog::default());
    flow.criteria_mut().location = "ca".to_string();
    flow.criteria_mut().price_range = 300.0;
    println!("🔍 {}", flow.search());
    for hotel in flow.results() {
        println!(
            "   #{} {} ({}) ${}/night ★{}",
            hotel.id, hotel.name, hotel.location, hotel.price, hotel.rating
        );
    }

    let first = flow.results().first().map(|h| h.id).unwrap_or(1);
    let hotel = flow.select_hotel(first)?;
    println!("🏨 Viewing {}", hotel.name);

    if let Err(e) = flow.book_now() {
        println!("⚠️  {}", e);
    }

    let check_in = NaiveDate::from_ymd_opt(2026, 11, 20).ok_or("bad date")?;
    let check_out = NaiveDate::from_ymd_opt(2026, 11, 23).ok_or("bad date")?;
    flow.set_dates(Some(check_in), Some(check_out));
    if let Some(q) = flow.quote() {
        println!("💵 ${} x {} nights = ${}", q.nightly_price, q.nights, q.total_price);
    }
    let booking = flow.book_now()?;
    println!(
        "✅ Booking confirmed! {} for {} guests, total ${} (Booking ID: {})",
        booking.hotel.name, booking.guests, booking.total_price, booking.reference
    );

    // Travellers can't reach the owner dashboard
    if let Err(e) = authorize(Some(&traveller), Some(Role::HotelOwner)) {
        println!("⛔ {}", e);
    }

    // --- Owner ---
    let owner = users.login("owner@example.com", "password123")?;
    authorize(Some(&owner), Some(Role::HotelOwner))?;
    println!("✅ Welcome back, {}!", owner.name);

    let mut dashboard = OwnerDashboard::default();
    println!("🏨 {} properties listed", dashboard.properties().len());

    dashboard.open_form();
    dashboard.draft_mut().name = "Harborview Inn".to_string();
    if let Err(e) = dashboard.submit() {
        println!("⚠️  {}", e);
    }

    dashboard.draft_mut().location = "Portland, ME".to_string();
    dashboard.draft_mut().price = "165".to_string();
    dashboard.add_amenity("Harbor Views");
    let added = dashboard.submit()?;
    println!(
        "✅ New property added successfully! #{} {} ({} amenities)",
        added.id,
        added.name,
        added.amenities.len()
    );
    println!("🏨 {} properties listed", dashboard.properties().len());

    Ok(())
}
