pub mod app_config;
pub mod command;
pub mod config;
pub mod coordinate;
pub mod model;
pub mod table;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use command::{
    validate_parameter, validate_parameters, CommandParameter, ParameterError, ParameterKind,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{is_valid_coordinate, parse_coordinate, Coordinate, CoordinateError};
pub use model::{
    AroRequest, AroRequestStatus, LogEntry, MissionCommand, MissionCommandReply, NewAroRequest,
    ProfileUpdate, TelemetryRecord, UserProfile,
};
pub use table::{CellValue, Column, SortDirection, SortState, Table, TableError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
