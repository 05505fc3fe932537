pub mod json_api;
mod rules_config_env;

pub use json_api::{
    apply_command_json, close_match_json, command_schema_json, create_match_json,
    match_snapshot_json, match_summary_json, ApiError, ApiResponse, CreateMatchResponse,
    API_VERSION,
};
