//! CLI argument definitions for the Showroom client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use showroom_model::FuelType;

#[derive(Parser)]
#[command(
    name = "showroom",
    version,
    about = "Showroom - browse, bookmark, and book vehicles",
    long_about = "Browse the vehicle catalog of a Showroom Resource Service.\n\n\
                  Bookmarks and bookings are scoped to this machine through\n\
                  anonymous identity tokens minted by the service on first use."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Resource Service base URL (overrides SHOWROOM_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse the vehicle catalog with filters and pagination.
    Vehicles(VehiclesArgs),

    /// Show one vehicle in detail.
    Show(ShowArgs),

    /// Per-brand inventory summary.
    Summary,

    /// Manage bookmarks for this machine's anonymous identity.
    #[command(subcommand)]
    Bookmark(BookmarkCommand),

    /// Book a vehicle.
    Book(BookArgs),

    /// List bookings made from this machine.
    Bookings,

    /// Add a vehicle to the catalog (requires the admin token).
    AddVehicle(AddVehicleArgs),

    /// Forget stored identity tokens.
    ResetIdentity(ResetIdentityArgs),
}

#[derive(Parser)]
pub struct VehiclesArgs {
    /// Page to fetch (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Only show vehicles of this brand.
    #[arg(long)]
    pub brand: Option<String>,

    /// Only show vehicles with this fuel type (Petrol, Diesel, Electric).
    #[arg(long = "fuel-type")]
    pub fuel_type: Option<FuelType>,

    /// Minimum price in rupees.
    #[arg(long = "min-price")]
    pub min_price: Option<i64>,

    /// Maximum price in rupees.
    #[arg(long = "max-price")]
    pub max_price: Option<i64>,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Vehicle id.
    #[arg(value_name = "VEHICLE_ID")]
    pub id: i64,
}

#[derive(Subcommand)]
pub enum BookmarkCommand {
    /// List bookmarked vehicles.
    List,

    /// Bookmark a vehicle.
    Add(BookmarkTargetArgs),

    /// Remove the bookmark for a vehicle.
    Remove(BookmarkTargetArgs),
}

#[derive(Parser)]
pub struct BookmarkTargetArgs {
    /// Vehicle id.
    #[arg(value_name = "VEHICLE_ID")]
    pub vehicle_id: i64,
}

#[derive(Parser)]
pub struct BookArgs {
    /// Vehicle id.
    #[arg(value_name = "VEHICLE_ID")]
    pub vehicle_id: i64,

    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Customer email address.
    #[arg(long)]
    pub email: String,
}

#[derive(Parser)]
pub struct AddVehicleArgs {
    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub name: String,

    /// Price in rupees.
    #[arg(long)]
    pub price: i64,

    #[arg(long = "fuel-type")]
    pub fuel_type: FuelType,

    #[arg(long = "image-url")]
    pub image_url: String,

    #[arg(long)]
    pub description: String,

    /// Admin token (falls back to SHOWROOM_ADMIN_TOKEN).
    #[arg(long = "admin-token")]
    pub admin_token: Option<String>,
}

#[derive(Parser)]
pub struct ResetIdentityArgs {
    /// Limit the reset to one scope; both are cleared when omitted.
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

/// CLI identity scope choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Bookmark,
    Booking,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
