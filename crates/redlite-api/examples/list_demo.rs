//! Demonstrates a persistent work queue built on a redlite list.
//!
//! Run with: cargo run -p redlite --example list_demo

use std::path::Path;

use redlite::{Db, ValueKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = "./demo_database";

    println!("=== redlite List Demo ===\n");

    if Path::new(db_path).exists() {
        std::fs::remove_dir_all(db_path)?;
        println!("Cleaned up previous demo data\n");
    }

    // PART 1: enqueue
    println!("PART 1: Enqueueing jobs...");
    {
        let db = Db::open(db_path)?;
        let jobs = db.bucket("0")?.list("jobs")?;

        let len = jobs.rpush(&["resize:1", "resize:2", "upload:1"])?;
        println!("   {} jobs queued", len);

        // Urgent work jumps the queue
        let len = jobs.lpush(&["thumbnail:9"])?;
        println!("   {} jobs queued after urgent push", len);

        db.close()?;
    }

    // PART 2: reopen and drain
    println!("\nPART 2: Reopening and draining...");
    {
        let db = Db::open(db_path)?;
        let bucket = db.bucket("0")?;
        println!("   type of 'jobs': {}", bucket.type_of("jobs")?);

        let jobs = bucket.list("jobs")?;
        println!("   next job: {:?}", jobs.index(0)?.map(String::from_utf8));

        while let Some(job) = jobs.lpop()? {
            println!("   processing {}", String::from_utf8_lossy(&job));
        }

        assert_eq!(bucket.type_of("jobs")?, ValueKind::None);
        println!("   queue empty, key released");

        db.close()?;
    }

    std::fs::remove_dir_all(db_path)?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
