//! Load Testing Tool
//!
//! Run with: cargo run --bin load_test --release -- --accounts 1000 --rounds 10

use std::time::Instant;

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_ledger::{Ledger, LedgerConfig};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_ledger=warn,load_test=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn arg_value(args: &[String], flag: &str, default: usize) -> usize {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let account_count = arg_value(&args, "--accounts", 1000).max(2);
    let rounds = arg_value(&args, "--rounds", 10);

    let config = LedgerConfig::from_env()?;
    let mut ledger = Ledger::with_config(config);

    println!("Load Test - {} accounts, {} rounds", account_count, rounds);

    let emails: Vec<String> = (0..account_count)
        .map(|i| format!("user{}@loadtest.local", i))
        .collect();

    let start = Instant::now();
    let mut operations = 0u64;
    let mut failures = 0u64;

    for (i, email) in emails.iter().enumerate() {
        ledger
            .register(&format!("User {}", i), email, "1234", Decimal::from(1000))
            .map_err(|e| anyhow::anyhow!("register {}: {}", email, e))?;
        ledger
            .authenticate(email, "1234")
            .map_err(|e| anyhow::anyhow!("login {}: {}", email, e))?;
        operations += 2;
    }

    let opening_total = ledger.total_balance();
    tracing::info!(%opening_total, "Accounts registered");

    for round in 0..rounds {
        for (i, email) in emails.iter().enumerate() {
            let peer = &emails[(i + round + 1) % emails.len()];
            if peer == email {
                continue;
            }
            let amount = Decimal::new(((i + round) % 50 + 1) as i64, 0);

            let transfer = ledger.transfer(email, peer, amount);
            operations += 1;
            if transfer.is_err() {
                failures += 1;
            }

            // withdraw and re-deposit the same dollar; the total must not move
            let one = Decimal::new(1, 0);
            operations += 1;
            match ledger.withdraw(email, one) {
                Ok(_) => {
                    ledger
                        .deposit(email, one)
                        .map_err(|e| anyhow::anyhow!("deposit {}: {}", email, e))?;
                    operations += 1;
                }
                Err(_) => failures += 1,
            }
        }
    }

    let closing_total = ledger.total_balance();
    if closing_total != opening_total {
        anyhow::bail!(
            "Balance conservation violated: opened with {}, closed with {}",
            opening_total,
            closing_total
        );
    }

    // Interest is the only operation allowed to grow the total.
    for email in &emails {
        if ledger.apply_interest(email, Decimal::new(1, 2)).is_err() {
            failures += 1;
        }
        operations += 1;
    }

    let elapsed = start.elapsed();
    let ops_per_sec = operations as f64 / elapsed.as_secs_f64();

    println!("\n=== Results ===");
    println!("Operations: {}", operations);
    println!("Rejected:   {}", failures);
    println!("Duration:   {:.2?}", elapsed);
    println!("Throughput: {:.0} ops/sec", ops_per_sec);
    println!("Total balance after interest: ${}", ledger.total_balance().round_dp(2));

    Ok(())
}
