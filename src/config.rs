use std::convert::TryInto;
use std::ffi::OsStr;
use std::fs::File;

use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::config_processors::Unquote;
use crate::error::{RecommendError, Result};
use crate::nearby::DEFAULT_RADIUS_KM;
use crate::similarity::DEFAULT_TOP_N;

// Weights of the three similarity signals in the composite score
const DEFAULT_SIMILARITY_1_WEIGHT: f64 = 30.0;
const DEFAULT_SIMILARITY_2_WEIGHT: f64 = 20.0;
const DEFAULT_SIMILARITY_3_WEIGHT: f64 = 8.0;

pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
    pub search: SearchConfig,
}

pub struct ServerConfig {
    pub host: String,
    pub port: usize,
    pub num_workers: usize,
}

pub struct LogConfig {
    pub level: String,
}

pub struct DataConfig {
    pub similarity_1_path: String,
    pub similarity_2_path: String,
    pub similarity_3_path: String,
    pub distance_matrix_path: String,
    pub property_table_path: String,
}

pub struct ModelConfig {
    pub similarity_1_weight: f64,
    pub similarity_2_weight: f64,
    pub similarity_3_weight: f64,
    pub default_top_n: usize,
}

pub struct SearchConfig {
    pub default_radius_km: u32,
}

/// Name, file and weight of one configured similarity signal.
pub struct SignalSource<'a> {
    pub name: &'static str,
    pub path: &'a str,
    pub weight: f64,
}

fn required<T, E: std::fmt::Display>(value: std::result::Result<T, E>) -> Result<T> {
    value.map_err(|err| RecommendError::Config(err.to_string()))
}

impl AppConfig {
    pub fn new(config_path: &str) -> Result<AppConfig> {
        // Initialize config object
        let mut conf = Config::default();

        // Check if there is a config file
        if let Ok(config_file) = File::open(config_path) {
            let config_text = required(ConfigText::new(config_file, config_path))?;
            conf.add_source(config_text);
        }

        // Define config params from environment variables
        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "property_table_path"]),
                OsStr::new("PROPERTY_TABLE"),
            ),
            (
                ConfPath::from(&["server", "num_workers"]),
                OsStr::new("NUM_WORKERS"),
            ),
            (
                ConfPath::from(&["log", "level"]),
                OsStr::new("LOG_LEVEL"),
            ),
        ]);
        conf.add_source(config_env);

        // Parse into custom config struct
        AppConfig::parse(conf)
    }

    fn parse(conf: Config) -> Result<AppConfig> {
        Ok(AppConfig {
            server: ServerConfig::parse(&conf, ConfPath::from(&["server"])),
            log: LogConfig::parse(&conf, ConfPath::from(&["log"])),
            data: DataConfig::parse(&conf, ConfPath::from(&["data"]))?,
            model: ModelConfig::parse(&conf, ConfPath::from(&["model"])),
            search: SearchConfig::parse(&conf, ConfPath::from(&["search"])),
        })
    }

    pub fn signals(&self) -> Vec<SignalSource<'_>> {
        vec![
            SignalSource {
                name: "similarity_1",
                path: &self.data.similarity_1_path,
                weight: self.model.similarity_1_weight,
            },
            SignalSource {
                name: "similarity_2",
                path: &self.data.similarity_2_path,
                weight: self.model.similarity_2_weight,
            },
            SignalSource {
                name: "similarity_3",
                path: &self.data.similarity_3_path,
                weight: self.model.similarity_3_weight,
            },
        ]
    }
}

impl ServerConfig {
    fn parse(conf: &Config, path: ConfPath) -> ServerConfig {
        ServerConfig {
            host: conf
                .get(path.push("host"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from("0.0.0.0")),
            port: conf.get(path.push("port")).trim().value().unwrap_or(8080),
            num_workers: conf
                .get(path.push("num_workers"))
                .trim()
                .value()
                // Detect number of CPUs
                .unwrap_or_else(|_| {
                    sys_info::cpu_num()
                        .ok()
                        .and_then(|qty| qty.try_into().ok())
                        .unwrap_or(1)
                }),
        }
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from("info")),
        }
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> Result<DataConfig> {
        Ok(DataConfig {
            similarity_1_path: required(conf.get(path.push("similarity_1_path")).unquote().value())?,
            similarity_2_path: required(conf.get(path.push("similarity_2_path")).unquote().value())?,
            similarity_3_path: required(conf.get(path.push("similarity_3_path")).unquote().value())?,
            distance_matrix_path: required(
                conf.get(path.push("distance_matrix_path")).unquote().value(),
            )?,
            property_table_path: required(
                conf.get(path.push("property_table_path")).unquote().value(),
            )?,
        })
    }
}

impl ModelConfig {
    fn parse(conf: &Config, path: ConfPath) -> ModelConfig {
        ModelConfig {
            similarity_1_weight: conf
                .get(path.push("similarity_1_weight"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_SIMILARITY_1_WEIGHT),
            similarity_2_weight: conf
                .get(path.push("similarity_2_weight"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_SIMILARITY_2_WEIGHT),
            similarity_3_weight: conf
                .get(path.push("similarity_3_weight"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_SIMILARITY_3_WEIGHT),
            default_top_n: conf
                .get(path.push("default_top_n"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_TOP_N),
        }
    }
}

impl SearchConfig {
    fn parse(conf: &Config, path: ConfPath) -> SearchConfig {
        SearchConfig {
            default_radius_km: conf
                .get(path.push("default_radius_km"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_RADIUS_KM),
        }
    }
}
