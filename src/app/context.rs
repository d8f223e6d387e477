use std::path::Path;
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::pipeline::Pipeline;

pub struct AppContext {
    pub config: Arc<Config>,
    pub pipeline: Pipeline,
}

impl AppContext {
    /// Load configuration (from `config_path` or the default location) and
    /// build the pipeline. With `static_only` no browser tier is wired in.
    pub fn new(config_path: Option<&Path>, static_only: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Self::with_config(config, static_only)
    }

    pub fn with_config(config: Config, static_only: bool) -> Result<Self> {
        let pipeline = if static_only {
            Pipeline::static_only(&config)?
        } else {
            Pipeline::from_config(&config)?
        };

        Ok(Self {
            config: Arc::new(config),
            pipeline,
        })
    }
}
