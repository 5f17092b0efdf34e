//! This demo shows:
//! - Creating a dotreddit client with a custom user agent
//! - Requesting the top posts of a subreddit for the week
//! - Printing their titles and authors

use dotreddit::filter::Timeframe;
use dotreddit::{Client, Config};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let config = Config::default().with_user_agent("dotreddit-demo/0.1");
    let client = Client::with_config(config);

    // /r/rust/top/.json?limit=10&t=week
    let mut request = client.r("rust");
    request.top()?.from(Timeframe::Week).limit(10);

    let reply = request.exe().await?;
    if let Some(err) = reply.transport_error() {
        println!("transport reported: {err}");
    }

    for thing in reply.listing()?.iter() {
        println!(
            "{} (by u/{})",
            thing.title().unwrap_or("<untitled>"),
            thing.author().unwrap_or("[deleted]")
        );
    }

    Ok(())
}
