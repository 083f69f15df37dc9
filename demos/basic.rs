//! Basic example demonstrating the updown.io API client.
//!
//! Run with:
//! ```
//! UPDOWN_API_KEY=your-key cargo run --example basic -- "My alias"
//! ```

use updown::{get_downtimes_page, Check, List, UpdownClient};

#[tokio::main]
async fn main() -> updown::Result<()> {
    tracing_subscriber::fmt::init();

    let client = UpdownClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Checks ---");
    let checks = Check::list(&client, &()).await?;
    for check in &checks {
        let state = if check.is_up() { "up" } else { "DOWN" };
        println!("  {} [{}] {}", check.token, state, check.display_name());
    }

    // Listing above already warmed the alias cache, so this is answered locally.
    if let Some(alias) = std::env::args().nth(1) {
        println!("\n--- Resolving alias {:?} ---", alias);
        match Check::token_for_alias(&client, &alias).await {
            Ok(token) => {
                println!("  token: {}", token);
                let page = get_downtimes_page(&client, &token, 1).await?;
                println!("  recent downtimes: {}", page.len());
            }
            Err(e) if e.is_alias_not_found() => println!("  no check has that alias"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
