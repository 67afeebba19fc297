// hotel-client/examples/admin_banners.rs
// Banner admin walkthrough against a running site

use std::sync::Arc;

use hotel_client::models::Banner;
use hotel_client::{
    ClientConfig, Direction, FixedAnswer, MoveOutcome, OrderedList, TracingNotifier, logger,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    logger::init_logger();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <list|up|down|toggle|delete> [banner_id]", args[0]);
        println!("  Example: {} up 65f1c0a2", args[0]);
        println!("  HOTEL_API_URL and HOTEL_API_TOKEN are read from the environment");
        return Ok(());
    }

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Connecting");
    let client = config.build_http_client()?;

    let banners: OrderedList<_, Banner> =
        OrderedList::new(client).with_notifier(Arc::new(TracingNotifier));
    banners.refresh().await?;

    let id = args.get(2).map(String::as_str).unwrap_or_default();
    match args[1].as_str() {
        "list" => {}
        "up" | "down" => {
            let direction = if args[1] == "up" {
                Direction::Up
            } else {
                Direction::Down
            };
            if banners.move_item(id, direction).await? == MoveOutcome::AtBoundary {
                tracing::info!(id, %direction, "Already at the edge");
            }
        }
        "toggle" => {
            banners.toggle_active(id).await?;
        }
        "delete" => {
            // Non-interactive: answering yes stands in for the prompt
            banners.delete(id, &FixedAnswer(true)).await?;
        }
        other => {
            println!("Unknown command: {other}");
            return Ok(());
        }
    }

    for banner in banners.items().await {
        println!(
            "{:>3}  {:<8}  {}  {}",
            banner.order,
            if banner.is_active { "active" } else { "hidden" },
            banner.id,
            banner.title
        );
    }
    Ok(())
}
