//! Serve command - run the HTTP API.

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(host: String, port: u16, max_rows: usize) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(max_rows);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting Tabula API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Endpoints: {}/api/...", url);
    println!("  Max rows per request: {}", max_rows);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
