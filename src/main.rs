use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use grubtrack::app::App;
use grubtrack::config::{Config, LOCAL_CONFIG_FILE};
use grubtrack::data::{ALL_CUISINES, SAMPLE_ORDER_ID};
use grubtrack::logging;
use grubtrack::progress::Orientation;
use grubtrack::search::filter_restaurants;
use grubtrack::session::Session;
use grubtrack::views;

#[derive(Parser)]
#[command(name = "grubtrack")]
#[command(about = "Order food and follow it to your door, from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants
    Restaurants {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Cuisine category, e.g. Italian
        #[arg(long, default_value = ALL_CUISINES)]
        cuisine: String,
    },

    /// Show a restaurant's menu
    Menu {
        /// Restaurant id
        restaurant: String,
    },

    /// Show the starter cart with totals
    Cart {
        /// Promo code to apply
        #[arg(short, long)]
        promo: Option<String>,
    },

    /// Show tracking progress for an order
    Track {
        /// Order id (default: the sample order)
        #[arg(default_value = SAMPLE_ORDER_ID)]
        order: String,

        /// Pretend the order is at this stage
        #[arg(short, long)]
        stage: Option<String>,

        /// Stepper layout (default from config)
        #[arg(short, long, value_enum)]
        orientation: Option<Orientation>,

        /// Print the stage status map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the profile, saved addresses, payment methods and order history
    Profile,

    /// Show the effective configuration
    Config {
        /// Write the defaults to ./grubtrack.toml
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand = interactive TUI, which must keep stderr clean
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Restaurants { search, cuisine }) => {
            cmd_restaurants(config, search.as_deref(), &cuisine)?;
        }
        Some(Commands::Menu { restaurant }) => {
            cmd_menu(config, &restaurant)?;
        }
        Some(Commands::Cart { promo }) => {
            cmd_cart(config, promo.as_deref())?;
        }
        Some(Commands::Track {
            order,
            stage,
            orientation,
            json,
        }) => {
            cmd_track(config, &order, stage.as_deref(), orientation, json)?;
        }
        Some(Commands::Profile) => {
            cmd_profile(config)?;
        }
        Some(Commands::Config { init }) => {
            cmd_config(&config, init)?;
        }
        None => {
            run_tui(config, logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_restaurants(config: Config, search: Option<&str>, cuisine: &str) -> Result<()> {
    let session = Session::new(config)?;
    let found = filter_restaurants(&session.restaurants, search.unwrap_or(""), cuisine);
    print!("{}", views::restaurant_list(&found));
    Ok(())
}

fn cmd_menu(config: Config, restaurant_id: &str) -> Result<()> {
    let session = Session::new(config)?;
    let restaurant = session.restaurant(restaurant_id);
    print!("{}", views::menu(restaurant_id, restaurant));
    if restaurant.is_none() {
        bail!("unknown restaurant '{}'", restaurant_id);
    }
    Ok(())
}

fn cmd_cart(config: Config, promo: Option<&str>) -> Result<()> {
    let mut session = Session::new(config)?;
    let outcome = promo.map(|code| {
        session.cart.set_promo_code(&code.to_ascii_uppercase());
        session.cart.apply_promo()
    });
    print!("{}", views::cart_summary(&session.cart, outcome.as_ref()));
    Ok(())
}

fn cmd_track(
    config: Config,
    order_id: &str,
    stage: Option<&str>,
    orientation: Option<Orientation>,
    json: bool,
) -> Result<()> {
    let orientation = orientation.unwrap_or(config.tracking.orientation);
    let session = Session::new(config)?;

    let mut tracker = session.track(order_id, Local::now());
    if let (Some(tracker), Some(stage)) = (tracker.as_mut(), stage) {
        tracker.set_current_stage(stage, Local::now());
    }

    if json {
        let Some(tracker) = tracker else {
            bail!("order not found: {}", order_id);
        };
        let out = serde_json::to_string_pretty(tracker.statuses())
            .context("Failed to serialize status map")?;
        println!("{}", out);
        return Ok(());
    }

    print!("{}", views::tracking(order_id, tracker.as_ref(), orientation));
    Ok(())
}

fn cmd_profile(config: Config) -> Result<()> {
    let session = Session::new(config)?;
    print!(
        "{}",
        views::profile(
            &session.profile,
            &session.addresses,
            &session.payment_methods,
            &session.order_history
        )
    );
    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> Result<()> {
    if init {
        let path = Path::new(LOCAL_CONFIG_FILE);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        config.save_to(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let out = toml::to_string_pretty(config).context("Failed to serialize config")?;
    print!("{}", out);
    Ok(())
}
