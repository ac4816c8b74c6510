use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vmm_sim::config::{Config, MemorySize, ReadFailurePolicy, StaleTlbPolicy};

#[derive(Parser)]
#[command(name = "vmm-sim")]
#[command(about = "Translates logical addresses through a simulated TLB and page table")]
struct Args {
    /// Physical memory size in frames (128 or 256)
    #[arg(value_parser = parse_memory_size)]
    memory_size: MemorySize,

    /// Binary backing store of 256-byte pages
    backing_store: PathBuf,

    /// Text file with one decimal logical address per line
    address_list: PathBuf,

    /// Directory for the output128.csv / output256.csv report
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// What to do when a page cannot be read from the backing store
    #[arg(long, value_enum, default_value_t = ReadFailurePolicy::Abort)]
    on_read_error: ReadFailurePolicy,

    /// Keep TLB entries of evicted pages instead of purging them
    #[arg(long)]
    keep_stale_tlb: bool,
}

fn parse_memory_size(s: &str) -> Result<MemorySize, String> {
    s.parse().map_err(|e: vmm_sim::config::ConfigError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = Config {
        memory_size: args.memory_size,
        backing_store: args.backing_store,
        address_list: args.address_list,
        output_dir: args.output_dir,
        read_failure: args.on_read_error,
        stale_tlb: if args.keep_stale_tlb {
            StaleTlbPolicy::Keep
        } else {
            StaleTlbPolicy::Purge
        },
    };

    let summary = vmm_sim::run(&config).with_context(|| {
        format!(
            "Simulation over {} failed",
            config.address_list.display()
        )
    })?;

    println!("Wrote {}", summary.output.display());
    println!(
        "{} addresses, page fault rate {:.2}%, TLB hit rate {:.2}%",
        summary.stats.total,
        summary.stats.fault_rate(),
        summary.stats.tlb_hit_rate()
    );
    Ok(())
}
