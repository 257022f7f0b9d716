use std::path::PathBuf;

use clap::Parser;
use console::style;
use libmykey::CardSnapshot;
use miette::Result;

#[derive(Parser)]
#[command(name = "mykey-cli", version, about = "Decode COGES MyKey card dump files")]
struct Args {
    /// Path to the .myk dump file
    file: PathBuf,

    /// Show the loader's diagnostic output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let dump = libmykey::load(&args.file)?;
    let snapshot = CardSnapshot::decode(&dump);
    print_report(&snapshot);

    Ok(())
}

fn print_report(snapshot: &CardSnapshot) {
    println!("{}", style("COGES MyKey card").bold());
    println!("UID:            0x{:016X}", snapshot.uid);
    println!("Encryption key: 0x{:08X}", snapshot.encryption_key);
    if snapshot.derived_key != snapshot.encryption_key {
        println!(
            "Derived key:    0x{:08X} {}",
            snapshot.derived_key,
            style("(differs from the key in the dump)").yellow()
        );
    }
    println!("Serial number:  {:08X}", snapshot.serial);
    if let Some(date) = snapshot.production_date {
        println!(
            "Produced:       {:02}/{:02}/{}",
            date.day, date.month, date.year
        );
    }
    println!(
        "Credit:         {} cents ({}.{:02} EUR)",
        snapshot.credit_cents,
        snapshot.credit_cents / 100,
        snapshot.credit_cents % 100
    );
    println!("Operations:     {}", snapshot.operation_count);
    println!(
        "Status:         {}",
        if snapshot.is_reset {
            style("reset").red()
        } else {
            style("active").green()
        }
    );

    if snapshot.transactions.is_empty() {
        println!("\nNo transaction history recorded.");
        return;
    }

    println!("\n{}", style("Transaction history (newest first)").bold());
    for (position, txn) in snapshot.transactions.iter().enumerate() {
        println!(
            "{:>2}. {:02}/{:02}/{} - {} cents ({}.{:02} EUR)",
            position + 1,
            txn.day,
            txn.month,
            txn.year,
            txn.credit_cents,
            txn.credit_cents / 100,
            txn.credit_cents % 100
        );
    }
}
