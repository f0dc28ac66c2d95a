//! Application orchestration module

pub mod initialization;
pub mod execution;

pub use initialization::{
    load_configuration,
    configure_logging,
    build_queue_config,
    colour_enabled,
};
pub use execution::run_driver;
