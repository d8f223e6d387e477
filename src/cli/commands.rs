use serde::Serialize;

use crate::app::{AppContext, Result, SnagError};
use crate::config::Config;

pub async fn extract(ctx: &AppContext, urls: &[String], compact: bool, with_source: bool) -> Result<()> {
    let outcomes = ctx.pipeline.extract_many(urls).await;

    let output = if with_source {
        render(&outcomes, compact)?
    } else {
        let records: Vec<_> = outcomes.into_iter().map(|o| o.record).collect();
        render(&records, compact)?
    };

    println!("{}", output);
    Ok(())
}

/// A single value is printed bare, several as a JSON array.
fn render<T: Serialize>(values: &[T], compact: bool) -> Result<String> {
    let json = match values {
        [single] => to_json(single, compact)?,
        many => to_json(&many, compact)?,
    };
    Ok(json)
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

pub fn show_config(ctx: &AppContext, explicit: Option<&std::path::Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };
    println!("# {}", path.display());

    let settings = toml::to_string_pretty(&*ctx.config)
        .map_err(|e| SnagError::Other(format!("Failed to render config: {}", e)))?;
    println!("{}", settings);
    Ok(())
}
