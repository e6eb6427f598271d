use clap::Parser;

use phone_calls::config::Config;

fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    match phone_calls::migrate::run(&config) {
        Ok(stats) => {
            println!("Import complete!");
            println!("  Companies: {}", stats.companies);
            println!("  People: {}", stats.people);
            println!("  Contracts: {}", stats.contracts);
            println!("  Calls: {}", stats.calls);
            println!("  Total: {}", stats.total());
        }
        Err(e) => {
            eprintln!("Migration failed: {}", e);
            std::process::exit(1);
        }
    }
}
