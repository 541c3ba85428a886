//! Fills a default map with twelve entries, clears it and prints what is left.

use chainmap::ChainMap;
use tracing_subscriber::EnvFilter;

/// Pairs inserted by the demo, in order
const ENTRIES: [(&str, &str); 12] = [
    ("apple", "red"),
    ("banana", "yellow"),
    ("carrot", "orange"),
    ("dog", "brown"),
    ("elephant", "gray"),
    ("frog", "green"),
    ("grape", "purple"),
    ("hat", "black"),
    ("ice cream", "white"),
    ("jacket", "blue"),
    ("kite", "pink"),
    ("moon", "silver"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut map = ChainMap::new();
    for (key, value) in ENTRIES {
        map.set(key.to_string(), value)?;
    }

    println!("Entries: {}, capacity: {}", map.len(), map.capacity());
    println!("{map:?}");

    map.clear();

    println!("Capacity after clear: {}", map.capacity());
    println!("Entries: {:?}", map.entries().collect::<Vec<_>>());
    println!("Keys: {:?}", map.keys().collect::<Vec<_>>());

    Ok(())
}
