use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub simulation: SimulationConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Latency profile for the simulated backend. Defaults mirror the UX this
/// client emulates: one second per request, half for the country directory,
/// and a 2-3 s "composing" window before a reply lands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    pub request_delay_ms: u64,
    pub directory_delay_ms: u64,
    pub composing_min_ms: u64,
    pub composing_max_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1_000,
            directory_delay_ms: 500,
            composing_min_ms: 2_000,
            composing_max_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}
