use std::ops::ControlFlow;

use redlite::logging::LogConfig;
use redlite::Db;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows every push, pop and bucket creation
    let _guard = LogConfig::debug().init();

    println!("=== redlite Logging Demo ===\n");

    let db = Db::in_memory()?;
    let bucket = db.bucket("0")?;

    println!("\n1. Writing strings...");
    bucket.set("user:1", "Alice")?;
    bucket.set("user:2", "Bob")?;

    println!("\n2. Building a list...");
    let feed = bucket.list("feed")?;
    feed.rpush(&["post:3", "post:4"])?;
    feed.lpush(&["post:2", "post:1"])?;

    println!("\n3. Reading back...");
    feed.range(0, -1, |offset, value| {
        println!("  [{}] {}", offset, String::from_utf8_lossy(value));
        ControlFlow::Continue(())
    })?;

    println!("\n4. Draining...");
    feed.lbatch_delete(3)?;
    feed.rpop()?;

    println!("\n5. Type mismatch is reported, not logged as corruption...");
    if let Err(e) = bucket.set("feed", "x").and(bucket.list("user:1").map(|_| ())) {
        println!("  {}", e);
    }

    db.close()?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
