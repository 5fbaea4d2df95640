mod defaults;
mod loader;

pub use defaults::{ApplyArgs, TrackerConfig};
pub use loader::{ENV_PREFIX, get_default_config, load_configuration, tracker_config, write_config_to};
