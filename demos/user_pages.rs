//! This demo shows:
//! - Walking every page of a user's comments
//! - Logging each composed URL with the debug flag
//! - Stopping the walk early with a cancel handle

use dotreddit::{Client, Config};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let username = std::env::args().nth(1).unwrap_or_else(|| "spez".to_string());
    let client = Client::with_config(Config::default().with_debug(true));

    let mut request = client.user(&username);
    request.comments()?.sort("new");

    let mut pages = request.all();
    let stop = pages.cancel_handle();
    let mut seen = 0;

    while let Some(page) = pages.next_page().await? {
        let listing = page.listing()?;
        seen += listing.len();
        println!("page {}: {} comments", pages.pages_fetched(), listing.len());

        // five pages is plenty for a demo
        if pages.pages_fetched() == 5 {
            stop.cancel();
        }
    }

    println!("u/{username}: {seen} comments in {} pages", pages.pages_fetched());
    Ok(())
}
