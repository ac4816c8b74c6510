use std::{fmt, path::PathBuf, str::FromStr};

use clap::ValueEnum;

/// How many frames physical memory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemorySize {
    Small,
    Large,
}

impl MemorySize {
    pub fn frames(self) -> usize {
        match self {
            MemorySize::Small => 128,
            MemorySize::Large => 256,
        }
    }

    pub fn output_file_name(self) -> &'static str {
        match self {
            MemorySize::Small => "output128.csv",
            MemorySize::Large => "output256.csv",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidMemorySize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMemorySize(value) => write!(
                f,
                "invalid memory size {:?}, choose either 128 or 256",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl FromStr for MemorySize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "128" => Ok(MemorySize::Small),
            "256" => Ok(MemorySize::Large),
            other => Err(ConfigError::InvalidMemorySize(other.to_string())),
        }
    }
}

/// What a fault does when the backing store cannot supply the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadFailurePolicy {
    /// Stop the run with an error.
    #[default]
    Abort,
    /// Log a warning and load a page of zeros instead.
    ZeroFill,
}

/// What happens to TLB slots naming a page that was just evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleTlbPolicy {
    #[default]
    Purge,
    /// Leave them in place; a later hit on one reads whatever the frame now holds.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub frames: usize,
    pub read_failure: ReadFailurePolicy,
    pub stale_tlb: StaleTlbPolicy,
}

impl EngineConfig {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            read_failure: ReadFailurePolicy::default(),
            stale_tlb: StaleTlbPolicy::default(),
        }
    }
}

/// Everything one simulation run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub memory_size: MemorySize,
    pub backing_store: PathBuf,
    pub address_list: PathBuf,
    /// Directory receiving the report; its file name follows `memory_size`.
    pub output_dir: PathBuf,
    pub read_failure: ReadFailurePolicy,
    pub stale_tlb: StaleTlbPolicy,
}

impl Config {
    pub fn new(
        memory_size: MemorySize,
        backing_store: impl Into<PathBuf>,
        address_list: impl Into<PathBuf>,
    ) -> Self {
        Self {
            memory_size,
            backing_store: backing_store.into(),
            address_list: address_list.into(),
            output_dir: PathBuf::from("."),
            read_failure: ReadFailurePolicy::default(),
            stale_tlb: StaleTlbPolicy::default(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.memory_size.output_file_name())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            frames: self.memory_size.frames(),
            read_failure: self.read_failure,
            stale_tlb: self.stale_tlb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_memory_size() {
        assert_eq!("128".parse::<MemorySize>(), Ok(MemorySize::Small));
        assert_eq!("256".parse::<MemorySize>(), Ok(MemorySize::Large));
        assert_eq!(
            "512".parse::<MemorySize>(),
            Err(ConfigError::InvalidMemorySize("512".to_string()))
        );
        assert!("".parse::<MemorySize>().is_err());
        assert!("abc".parse::<MemorySize>().is_err());
    }

    #[test]
    fn memory_size_selects_frames_and_output() {
        assert_eq!(MemorySize::Small.frames(), 128);
        assert_eq!(MemorySize::Large.frames(), 256);
        assert_eq!(MemorySize::Small.output_file_name(), "output128.csv");
        assert_eq!(MemorySize::Large.output_file_name(), "output256.csv");
    }

    #[test]
    fn config_defaults() {
        let mut config = Config::new(MemorySize::Large, "BACKING_STORE.bin", "addresses.txt");
        assert_eq!(config.output_path(), PathBuf::from("./output256.csv"));
        assert_eq!(config.engine_config(), EngineConfig::new(256));

        config.output_dir = PathBuf::from("out");
        config.read_failure = ReadFailurePolicy::ZeroFill;
        assert_eq!(config.output_path(), PathBuf::from("out/output256.csv"));
        assert_eq!(config.engine_config().read_failure, ReadFailurePolicy::ZeroFill);
    }
}
