//! CLI command implementations.

pub mod simulate;

use anyhow::{Context, Result};
use workbee_config::load_config;

pub fn validate(path: &str) -> Result<()> {
    let config = load_config(path).with_context(|| format!("Configuration error in {}", path))?;

    println!("Configuration is valid");
    match config.engine.free_bookings {
        Some(n) => println!("  free bookings: {}", n),
        None => println!("  free bookings: unlimited"),
    }
    println!(
        "  match delay:   {}ms (+ up to {}ms jitter)",
        config.simulator.delay.as_millis(),
        config.simulator.jitter.as_millis()
    );
    println!("  server:        {}", config.server.bind);
    println!("  roster:        {} workers", config.roster.len());
    for worker in &config.roster {
        let skills: Vec<&str> = worker.skills.iter().map(String::as_str).collect();
        println!(
            "    {} ({:.1}, {} jobs): {}",
            worker.name,
            worker.rating,
            worker.completed_jobs,
            skills.join(", ")
        );
    }
    Ok(())
}
