//! End-to-end order flow: configuration, checkout, tracking and the text views
//! the subcommands print.

use chrono::Local;
use std::fs;
use tempfile::TempDir;

use grubtrack::config::Config;
use grubtrack::data::SAMPLE_ORDER_ID;
use grubtrack::progress::{Orientation, StageStatus};
use grubtrack::session::Session;
use grubtrack::views;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn write_config(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("grubtrack.toml");
    fs::write(&path, body).expect("write config");
    path.to_string_lossy().into_owned()
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn test_explicit_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[cart]
delivery_fee = 500

[tracking]
orientation = "vertical"
"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.cart.delivery_fee, 500);
    assert_eq!(config.tracking.orientation, Orientation::Vertical);
    assert_eq!(config.cart.promo_code, Config::default().cart.promo_code);
}

#[test]
fn test_custom_stages_drive_tracking() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[tracking.stages]]
id = "placed"
name = "Placed"

[[tracking.stages]]
id = "ready"
name = "Ready for Pickup"
"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    let mut session = Session::new(config).unwrap();
    let order_id = session.checkout(Local::now()).unwrap();

    let tracker = session.track(&order_id, Local::now()).unwrap();
    assert_eq!(tracker.current_stage_id(), "placed");
    let text = views::stepper(&tracker.stepper(Orientation::Horizontal));
    assert_eq!(text, "[●] Placed ── [ ] Ready for Pickup\n");
}

#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("grubtrack.toml");

    let mut config = Config::default();
    config.cart.promo_percent = 25;
    config.save_to(&path).unwrap();

    let loaded = Config::load(path.to_str()).unwrap();
    assert_eq!(loaded.cart.promo_percent, 25);
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[test]
fn test_checkout_then_follow_order_to_delivery() {
    let mut session = Session::new(Config::default()).unwrap();
    let order_id = session.checkout(Local::now()).unwrap();
    assert!(session.cart.is_empty());
    assert!(session.checkout(Local::now()).is_err());

    let tracker = session.track(&order_id, Local::now()).unwrap();
    let mut seen = vec![tracker.current_stage_id().to_string()];
    while let Some(next) = session.advance_order(&order_id) {
        seen.push(next);
    }
    assert_eq!(seen, ["confirmed", "preparing", "outForDelivery", "delivered"]);

    let tracker = session.track(&order_id, Local::now()).unwrap();
    assert!(tracker.is_finished());
    assert_eq!(tracker.statuses().count(StageStatus::Completed), 3);
    assert_eq!(tracker.statuses().get("delivered"), Some(StageStatus::InProgress));
}

#[test]
fn test_sample_order_views() {
    let session = Session::new(Config::default()).unwrap();
    let tracker = session.track(SAMPLE_ORDER_ID, Local::now());

    let text = views::tracking(SAMPLE_ORDER_ID, tracker.as_ref(), Orientation::Vertical);
    assert!(text.contains("[✓] Order Confirmed"));
    assert!(text.contains("[●] Preparing Food"));
    assert!(text.contains("[ ] Delivered"));
    assert!(text.contains("Delivering to:"));

    let missing = session.track("nope", Local::now());
    assert_eq!(
        views::tracking("nope", missing.as_ref(), Orientation::Horizontal),
        "Order not found: nope\n"
    );
}

#[test]
fn test_status_map_json_is_keyed_by_stage_id() {
    let session = Session::new(Config::default()).unwrap();
    let mut tracker = session.track(SAMPLE_ORDER_ID, Local::now()).unwrap();
    assert!(tracker.set_current_stage("outForDelivery", Local::now()));

    let json = serde_json::to_value(tracker.statuses()).unwrap();
    assert_eq!(json["confirmed"], "completed");
    assert_eq!(json["preparing"], "completed");
    assert_eq!(json["outForDelivery"], "inProgress");
    assert_eq!(json["delivered"], "pending");
}
