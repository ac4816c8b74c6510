//! Demand-paged virtual memory simulator.
//!
//! A stream of logical addresses is translated through a TLB and a page
//! table, faulting pages in from a backing store file and evicting the least
//! recently used page once physical memory is full.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use disk::BackingStore;
use log::info;

pub mod addresses;
pub mod config;
pub mod engine;
pub mod report;
pub mod stats;

pub use addresses::AddressListError;
pub use config::{Config, MemorySize};
pub use engine::{EngineError, TranslationEngine};
pub use stats::Statistics;

#[derive(Debug)]
pub enum SimError {
    FileOpen { path: PathBuf, source: io::Error },
    AddressList(AddressListError),
    Engine(EngineError),
    Output { path: PathBuf, source: io::Error },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::FileOpen { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
            SimError::AddressList(e) => write!(f, "{}", e),
            SimError::Engine(e) => write!(f, "{}", e),
            SimError::Output { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::FileOpen { source, .. } => Some(source),
            SimError::AddressList(e) => Some(e),
            SimError::Engine(e) => Some(e),
            SimError::Output { source, .. } => Some(source),
        }
    }
}

impl From<AddressListError> for SimError {
    fn from(e: AddressListError) -> Self {
        SimError::AddressList(e)
    }
}

impl From<EngineError> for SimError {
    fn from(e: EngineError) -> Self {
        SimError::Engine(e)
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: Statistics,
}

/// Runs one simulation and writes the report.
///
/// Both inputs are opened and every address is translated before the
/// report file is created, so a failed run leaves no report behind.
pub fn run(config: &Config) -> Result<RunSummary, SimError> {
    let store = BackingStore::open(&config.backing_store).map_err(|source| SimError::FileOpen {
        path: config.backing_store.clone(),
        source,
    })?;
    let list = File::open(&config.address_list).map_err(|source| SimError::FileOpen {
        path: config.address_list.clone(),
        source,
    })?;
    let addresses = addresses::read_addresses(BufReader::new(list))?;
    info!(
        "Translating {} addresses with {} frames",
        addresses.len(),
        config.memory_size.frames()
    );

    let mut engine = TranslationEngine::new(store, config.engine_config());
    let translations = engine.run(addresses)?;

    let output = config.output_path();
    let file = File::create(&output).map_err(|source| SimError::Output {
        path: output.clone(),
        source,
    })?;
    report::write_report(BufWriter::new(file), &translations, engine.stats()).map_err(
        |source| SimError::Output {
            path: output.clone(),
            source,
        },
    )?;
    info!("Wrote {}", output.display());

    Ok(RunSummary {
        output,
        stats: *engine.stats(),
    })
}
