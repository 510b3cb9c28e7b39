//! Bitmap index demo
//!
//! Prints a functional transcript (build, query, append, delete) and then
//! compares a linear scan against the index on growing synthetic tables.
//!
//! ```sh
//! cargo run --release --bin bitmap-demo -- --max-rows 21000 --step 1000 --seed 1
//! ```

use bitmap_index::scan::naive_search;
use bitmap_index::synthetic::cartesian_records;
use bitmap_index::{BitmapIndex, Condition, Record};
use clap::{value_parser, Arg, ArgAction, Command};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments
    let matches = Command::new("bitmap-demo")
        .about("exercise a bitmap index and compare it against a linear scan")
        .arg(
            Arg::new("max-rows")
                .long("max-rows")
                .default_value("21000")
                .value_parser(value_parser!(usize))
                .help("Largest table size in the speed test"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .default_value("1000")
                .value_parser(value_parser!(usize))
                .help("Table size increment in the speed test"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("0")
                .value_parser(value_parser!(u64))
                .help("Seed for picking probe records"),
        )
        .arg(
            Arg::new("skip-speed")
                .long("skip-speed")
                .action(ArgAction::SetTrue)
                .help("Only print the functional transcript"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log index operations"),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag("verbose") {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    functionality_test()?;

    if !matches.get_flag("skip-speed") {
        let max_rows = *matches.get_one::<usize>("max-rows").ok_or("missing --max-rows")?;
        let step = *matches.get_one::<usize>("step").ok_or("missing --step")?;
        let seed = *matches.get_one::<u64>("seed").ok_or("missing --seed")?;
        if step == 0 {
            return Err("--step must be positive".into());
        }
        speed_test(max_rows, step, seed)?;
    }
    Ok(())
}

fn functionality_test() -> bitmap_index::Result<()> {
    let mut index = BitmapIndex::build(vec![
        Record::new(1, ["a", "A"]),
        Record::new(2, ["b", "A"]),
        Record::new(3, ["a", "B"]),
    ])?;
    println!("Index after creating:\n{}", index);

    let rules = [Condition::new(0, "a")];
    println!("Search value 'a' in column #0 returns positions: {:?}", index.get(&rules)?);

    index.append(Record::new(4, ["a", "A"]))?;
    index.append(Record::new(5, ["b", "B"]))?;
    index.append(Record::new(6, ["C", "D"]))?;
    println!("Index after adding elements:\n{}", index);
    println!("Search value 'a' in column #0 returns positions: {:?}", index.get(&rules)?);

    let removed = index.delete(3)?;
    println!("Index after deleting position 3 ({}):\n{}", removed, index);
    Ok(())
}

fn speed_test(max_rows: usize, step: usize, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("Speed testing starts\n");
    let all = cartesian_records(max_rows);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ratios = Vec::new();

    for n in (step..=all.len()).step_by(step) {
        let table = &all[..n];
        info!(rows = n, "testing speed");
        let index = BitmapIndex::build(table.to_vec())?;
        let probe = &table[rng.gen_range(0..n)];

        let start = Instant::now();
        let naive = naive_search(table, &probe.values);
        let t_naive = start.elapsed();

        let conditions: Vec<Condition> = probe
            .values
            .iter()
            .enumerate()
            .map(|(c, v)| Condition::new(c, v.clone()))
            .collect();
        let start = Instant::now();
        let found = index.get(&conditions)?;
        let t_index = start.elapsed();

        if naive != found {
            return Err(format!("index disagrees with scan at {} rows", n).into());
        }
        ratios.push(t_naive.as_secs_f64() / t_index.as_secs_f64().max(f64::EPSILON));
    }

    if ratios.is_empty() {
        println!("No table sizes to test");
        return Ok(());
    }
    let avg = ratios.iter().sum::<f64>() / ratios.len() as f64;
    println!("\nOn average, the index is {} times faster than naive search", avg.round());
    Ok(())
}
