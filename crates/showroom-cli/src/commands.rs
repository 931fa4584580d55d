//! Command handlers.
//!
//! Each handler drives the state layer end to end: the vehicles listing
//! goes through the paginated query controller, bookmark and booking
//! commands go through the token-scoped flows, and every service failure
//! is reported as the display message the error carries.

use anyhow::{Result, anyhow, bail};
use tracing::info;

use showroom_client::ShowroomClient;
use showroom_model::{NewVehicle, Vehicle, VehicleFilters, format_inr};
use showroom_state::{
    BookingFlow, BookmarkFlow, FetchFuture, PageRequest, PagedQuery, Phase, Scope, TokenStore,
};

use crate::cli::{
    AddVehicleArgs, BookArgs, BookmarkCommand, ScopeArg, ShowArgs, VehiclesArgs,
};
use showroom_cli::tables;

/// Environment variable consulted when `--admin-token` is not given.
const ADMIN_TOKEN_ENV: &str = "SHOWROOM_ADMIN_TOKEN";

pub async fn run_vehicles(client: &ShowroomClient, args: &VehiclesArgs) -> Result<()> {
    let filters = VehicleFilters {
        brand: args.brand.clone(),
        fuel_type: args.fuel_type,
        min_price: args.min_price,
        max_price: args.max_price,
    };

    let query = PagedQuery::with_filters(
        {
            let client = client.clone();
            move |request: PageRequest| -> FetchFuture<Vehicle> {
                let client = client.clone();
                Box::pin(async move {
                    let filters = VehicleFilters::from_map(&request.filters);
                    client.list_vehicles(request.page, &filters).await
                })
            }
        },
        filters.to_map(),
    );

    query.change_page_with(args.page, filters.to_map()).await;

    let state = query.snapshot();
    if state.phase == Phase::Error {
        bail!(
            state
                .error_message
                .unwrap_or_else(|| "The request could not be completed.".to_string())
        );
    }
    if state.items.is_empty() {
        println!("No vehicles matched.");
        return Ok(());
    }
    println!("{}", tables::vehicles_table(&state.items));
    if let Some(info) = &state.page_info {
        let mut line = format!("Page {}, {} vehicles total", state.page, info.total_count);
        if info.has_previous || info.has_next {
            let mut neighbors = Vec::new();
            if info.has_previous {
                neighbors.push(format!("--page {}", state.page - 1));
            }
            if info.has_next {
                neighbors.push(format!("--page {}", state.page + 1));
            }
            line.push_str(&format!(" ({})", neighbors.join(", ")));
        }
        println!("{line}");
    }
    Ok(())
}

pub async fn run_show(
    client: &ShowroomClient,
    tokens: &TokenStore,
    args: &ShowArgs,
) -> Result<()> {
    let vehicle = client
        .vehicle(args.id)
        .await
        .map_err(|error| anyhow!(error.user_message()))?;

    let flow = BookmarkFlow::new(client.clone(), tokens.clone());
    let bookmarked = flow.is_bookmarked(args.id).await;

    println!("{}  (#{})", vehicle.title(), vehicle.id);
    println!("Price: ₹{}", format_inr(vehicle.price));
    println!("Fuel: {}", vehicle.fuel_type);
    println!("Bookmarked: {}", if bookmarked { "yes" } else { "no" });
    if !vehicle.description.is_empty() {
        println!();
        println!("{}", vehicle.description);
    }
    Ok(())
}

pub async fn run_summary(client: &ShowroomClient) -> Result<()> {
    let summary = client
        .vehicle_summary()
        .await
        .map_err(|error| anyhow!(error.user_message()))?;
    if summary.is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }
    println!("{}", tables::summary_table(&summary));
    Ok(())
}

pub async fn run_bookmark(
    client: &ShowroomClient,
    tokens: &TokenStore,
    command: &BookmarkCommand,
) -> Result<()> {
    let flow = BookmarkFlow::new(client.clone(), tokens.clone());
    match command {
        BookmarkCommand::List => {
            let entries = flow
                .list()
                .await
                .map_err(|error| anyhow!(error.user_message()))?;
            if entries.is_empty() {
                println!("No bookmarks yet. Bookmark a vehicle to get started.");
                return Ok(());
            }
            println!("{}", tables::bookmarks_table(&entries));
        }
        BookmarkCommand::Add(args) => {
            let bookmark = flow
                .add(args.vehicle_id)
                .await
                .map_err(|error| anyhow!(error.user_message()))?;
            info!(bookmark_id = bookmark.id, "Bookmark created");
            println!("Bookmarked vehicle #{}.", args.vehicle_id);
        }
        BookmarkCommand::Remove(args) => {
            let removed = flow
                .remove_vehicle(args.vehicle_id)
                .await
                .map_err(|error| anyhow!(error.user_message()))?;
            if removed {
                println!("Removed the bookmark for vehicle #{}.", args.vehicle_id);
            } else {
                println!("Vehicle #{} is not bookmarked.", args.vehicle_id);
            }
        }
    }
    Ok(())
}

pub async fn run_book(
    client: &ShowroomClient,
    tokens: &TokenStore,
    args: &BookArgs,
) -> Result<()> {
    let flow = BookingFlow::new(client.clone(), tokens.clone());
    let booking = flow
        .create(args.vehicle_id, &args.name, &args.email)
        .await
        .map_err(|error| anyhow!(error.user_message()))?;
    info!(booking_id = booking.id, "Booking created");
    println!(
        "Booking #{} confirmed for vehicle #{}.",
        booking.id, args.vehicle_id
    );
    Ok(())
}

pub async fn run_bookings(client: &ShowroomClient, tokens: &TokenStore) -> Result<()> {
    let flow = BookingFlow::new(client.clone(), tokens.clone());
    let bookings = flow
        .list()
        .await
        .map_err(|error| anyhow!(error.user_message()))?;
    if bookings.is_empty() {
        println!("No bookings yet. Book a vehicle to get started.");
        return Ok(());
    }
    println!("{}", tables::bookings_table(&bookings));
    Ok(())
}

pub async fn run_add_vehicle(client: &ShowroomClient, args: &AddVehicleArgs) -> Result<()> {
    let admin_token = args
        .admin_token
        .clone()
        .or_else(|| std::env::var(ADMIN_TOKEN_ENV).ok())
        .filter(|token| !token.trim().is_empty());
    let Some(admin_token) = admin_token else {
        bail!("admin token required (pass --admin-token or set {ADMIN_TOKEN_ENV})");
    };

    let vehicle = NewVehicle {
        brand: args.brand.clone(),
        name: args.name.clone(),
        price: args.price,
        fuel_type: args.fuel_type,
        image_url: args.image_url.clone(),
        description: args.description.clone(),
    };
    let created = client
        .create_vehicle(&vehicle, &admin_token)
        .await
        .map_err(|error| anyhow!(error.user_message()))?;
    println!("Created vehicle #{}: {}.", created.id, created.title());
    Ok(())
}

pub fn run_reset_identity(tokens: &TokenStore, scope: Option<ScopeArg>) -> Result<()> {
    let scopes: Vec<Scope> = match scope {
        Some(ScopeArg::Bookmark) => vec![Scope::Bookmark],
        Some(ScopeArg::Booking) => vec![Scope::Booking],
        None => Scope::ALL.to_vec(),
    };
    for scope in scopes {
        tokens.clear(scope);
        println!("Cleared the {scope} token.");
    }
    Ok(())
}
