use anyhow::{bail, Result};
use bloomfilt::{BloomFilterBuilder, DEFAULT_K};
use tracing::info;

const BIT_ARRAY_LENGTH: u64 = 24 * 1024;
const INSERTED: u32 = 1000;
const QUERIED: u32 = 10000;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut filter = BloomFilterBuilder::with_size(BIT_ARRAY_LENGTH, DEFAULT_K).build()?;
    info!(bit_len = filter.bit_len(), k = filter.k(), "created empty bloom filter");

    let mut failed = 0;
    for i in 0..INSERTED {
        if !filter.add(&i.to_le_bytes()) {
            println!("[x]\tfailed to add entry ({})", i);
            failed += 1;
        }
    }
    if failed == 0 {
        info!(count = INSERTED, "added entries");
    }

    for i in 0..INSERTED {
        if !filter.contains(&i.to_le_bytes()) {
            println!("[x]\ttest for {} returned false", i);
            failed += 1;
        }
    }

    let mut false_positives = 0;
    for i in INSERTED..QUERIED {
        if filter.contains(&i.to_le_bytes()) {
            println!("[x]\ttest for {} returned true", i);
            false_positives += 1;
        }
    }

    print!("{}", filter.dump());
    println!("Invalid test results: {}", false_positives);

    if failed > 0 {
        bail!("{} inserted entries were rejected or not found", failed);
    }
    Ok(())
}
