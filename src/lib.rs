pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::ReqwestGateway, registry::ClientRegistry};
pub use config::TomlConfig;
pub use domain::clients::{ClientTag, DrafthouseClient, FeedsClient, Tagged};
pub use domain::day_part::{parse_time_of_day, DayPart};
pub use domain::ports::HttpGateway;
pub use utils::error::{MccError, Result};
