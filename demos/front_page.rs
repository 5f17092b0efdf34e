//! This demo shows:
//! - Listing the front page through the event stream
//! - Reacting to the terminal `End`/`Error` event

use dotreddit::{filter::Filter, Client, PageEvent};
use futures::StreamExt;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().init()?;

    let client = Client::new();
    let mut request = client.list(Some(Filter::New));
    request.limit(25);

    // only look at the first three pages
    let events = request.all().events().take(4);
    futures::pin_mut!(events);

    while let Some(event) = events.next().await {
        match event {
            PageEvent::Data(page) => {
                let listing = page.listing()?;
                for thing in listing.iter() {
                    let when = thing
                        .created()
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_default();
                    println!("[{when}] {}", thing.title().unwrap_or_default());
                }
            }
            PageEvent::End => println!("-- end of listing --"),
            PageEvent::Error(err) => return Err(err.into()),
        }
    }

    Ok(())
}
