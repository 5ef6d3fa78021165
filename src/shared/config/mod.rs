/// 環境・API・保存先の設定
pub mod environment;

pub use environment::{
    initialize_logging_system, load_environment_variables, ApiConfig, Environment,
    EnvironmentConfig, StorageConfig,
};
