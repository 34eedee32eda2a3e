//! Issue a Member ID and validate a few candidate strings against an
//! in-memory registry.
//!
//! ```bash
//! cargo run --example issue_and_validate
//! ```

use chrono::NaiveDate;
use member_id::{Config, Identity, InMemoryRegistry, MemberIdService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let service = MemberIdService::new(config.countries, InMemoryRegistry::new());

    let identity = Identity {
        first_name: "Jose".into(),
        last_name: "Vasconcelos".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1961, 1, 1).expect("valid date"),
        country_code: "MX".into(),
    };
    let id = service.issue(&identity).await?;
    println!("issued: {}", id);

    let candidates = [
        id.value(),
        "23-MX-90-07-CB84".to_string(),
        "23-US-90-07-CB84".to_string(),
        "23-US-90-07-CB84-AAA".to_string(),
    ];
    for candidate in candidates {
        let verdict = service.validate(&candidate).await?;
        match verdict.invalid_reason {
            Some(reason) => println!("{candidate}: invalid ({reason})"),
            None => println!(
                "{candidate}: valid, registered={}",
                verdict.is_registered
            ),
        }
    }

    Ok(())
}
