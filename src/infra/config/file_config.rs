use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, SearchConfig, SimulationConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub simulation: Option<FileSimulationConfig>,
    pub search: Option<FileSearchConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(simulation) = self.simulation {
            simulation.merge_into(&mut config.simulation);
        }

        if let Some(search) = self.search {
            search.merge_into(&mut config.search);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSimulationConfig {
    pub request_delay_ms: Option<u64>,
    pub directory_delay_ms: Option<u64>,
    pub composing_min_ms: Option<u64>,
    pub composing_max_ms: Option<u64>,
}

impl FileSimulationConfig {
    fn merge_into(self, config: &mut SimulationConfig) {
        if let Some(delay_ms) = self.request_delay_ms {
            config.request_delay_ms = delay_ms;
        }

        if let Some(delay_ms) = self.directory_delay_ms {
            config.directory_delay_ms = delay_ms;
        }

        if let Some(min_ms) = self.composing_min_ms {
            config.composing_min_ms = min_ms;
        }

        if let Some(max_ms) = self.composing_max_ms {
            config.composing_max_ms = max_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSearchConfig {
    pub debounce_ms: Option<u64>,
}

impl FileSearchConfig {
    fn merge_into(self, config: &mut SearchConfig) {
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
    }
}
