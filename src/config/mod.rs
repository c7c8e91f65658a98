/// Configuration system for nexusiq.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::NexusConfig::default()`]
/// 2. **User global config**: `~/.nexusiq/config.toml`
/// 3. **Project local config**: `.nexusiq.toml` in the current directory
/// 4. **Environment variables**: `NEXUSIQ_*` overrides (highest precedence)
///
/// Layers are merged key by key: a file that sets only `[scoring].wau_cap`
/// leaves every other value from the earlier layers intact.
///
/// # Usage
///
/// ```rust,ignore
/// use nexusiq::config;
///
/// let cfg = config::load();
/// let datasets = nexusiq::data::Datasets::load(&cfg.data)?;
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::NexusConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars. Malformed files
/// are skipped with a warning so a bad edit never blocks the dashboard.
pub fn load() -> NexusConfig {
    let layers = [global_config_path(), project_config_path()];
    let mut config = load_layers(layers.iter().flatten().map(PathBuf::as_path));
    apply_env_overrides(&mut config);
    config
}

/// Merge the given TOML files, in order, over the built-in defaults.
fn load_layers<'a>(paths: impl Iterator<Item = &'a Path>) -> NexusConfig {
    let mut merged = match toml::Value::try_from(NexusConfig::default()) {
        Ok(value) => value,
        Err(_) => return NexusConfig::default(),
    };

    for path in paths {
        if let Some(layer) = load_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    merged.try_into().unwrap_or_else(|e| {
        tracing::warn!("merged config is invalid, using defaults: {e}");
        NexusConfig::default()
    })
}

/// Read a TOML file as an untyped value tree.
///
/// Returns `None` if the file doesn't exist or doesn't parse.
fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(value) => {
            tracing::debug!(path = %path.display(), "config layer loaded");
            Some(value)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring malformed config: {e}");
            None
        }
    }
}

/// Deep-merge `overlay` into `base`: tables merge recursively, every other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.nexusiq/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nexusiq").join("config.toml"))
}

/// Path to the project local config: `.nexusiq.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".nexusiq.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `NEXUSIQ_DATA_DIR`: dataset directory
/// - `NEXUSIQ_ADDR`: dashboard listen address
/// - `NEXUSIQ_OPEN_BROWSER`: open the browser on `serve` (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut NexusConfig) {
    if let Ok(val) = std::env::var("NEXUSIQ_DATA_DIR")
        && !val.is_empty()
    {
        config.data.dir = val;
    }
    if let Ok(val) = std::env::var("NEXUSIQ_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("NEXUSIQ_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.nexusiq/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.nexusiq/ directory")?;
    }

    fs::write(&path, NexusConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted config key (e.g. `scoring.wau_cap`) in the global
/// config file, creating the file from defaults if needed.
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)?;
    Ok(path)
}

/// Set a dotted key in the config file at `path`.
///
/// The key must exist in the schema; the new value keeps the type of the
/// existing one.
fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root = toml::Value::try_from(NexusConfig::default())
        .context("failed to serialize default config")?;

    if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        let existing: toml::Value =
            toml::from_str(&content).context("failed to parse config as TOML value")?;
        merge_values(&mut root, existing);
    }

    set_toml_value(&mut root, key, value)?;

    // Reject updates that no longer deserialize (e.g. negative limits).
    let _: NexusConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key: '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected a section before '{leaf}' in '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("'{key}' is a section, not a value"),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn layers_merge_key_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "[scoring]\nwau_cap = 200.0\n[server]\naddr = \"0.0.0.0:8080\"\n").unwrap();
        fs::write(&project, "[scoring]\nstickiness_cap = 40.0\n").unwrap();

        let config = load_layers([global.as_path(), project.as_path()].into_iter());
        assert_eq!(config.scoring.wau_cap, 200.0);
        assert_eq!(config.scoring.stickiness_cap, 40.0);
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.display.feedback_limit, 50);
    }

    #[test]
    fn malformed_layer_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[scoring\nwau_cap = ").unwrap();

        let config = load_layers([bad.as_path()].into_iter());
        assert_eq!(config, NexusConfig::default());
    }

    #[test]
    fn set_toml_value_updates_float() {
        let mut root: toml::Value = toml::from_str("[scoring]\nwau_cap = 150.0\n").unwrap();
        set_toml_value(&mut root, "scoring.wau_cap", "175").unwrap();
        let v = root["scoring"]["wau_cap"].as_float().unwrap();
        assert!((v - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_toml_value_updates_bool_and_integer() {
        let mut root: toml::Value =
            toml::from_str("[server]\nopen_browser = true\n[display]\nfeedback_limit = 50\n").unwrap();
        set_toml_value(&mut root, "server.open_browser", "off").unwrap();
        set_toml_value(&mut root, "display.feedback_limit", "25").unwrap();
        assert_eq!(root["server"]["open_browser"].as_bool(), Some(false));
        assert_eq!(root["display"]["feedback_limit"].as_integer(), Some(25));
    }

    #[test]
    fn set_toml_value_rejects_unknown_and_bad_types() {
        let mut root: toml::Value = toml::from_str("[display]\nfeedback_limit = 50\n").unwrap();
        assert!(set_toml_value(&mut root, "display.nope", "1").is_err());
        assert!(set_toml_value(&mut root, "missing.key", "1").is_err());
        assert!(set_toml_value(&mut root, "display.feedback_limit", "many").is_err());
        assert!(set_toml_value(&mut root, "display", "1").is_err());
    }

    #[test]
    fn set_config_value_at_creates_file_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_config_value_at(&path, "data.dir", "/srv/nexus").unwrap();

        let written: NexusConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.data.dir, "/srv/nexus");
        assert_eq!(written.scoring, schema::ScoringConfig::default());
    }

    #[test]
    fn set_config_value_at_rejects_negative_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_config_value_at(&path, "display.entity_limit", "-3").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn show_effective_config_round_trips() {
        let text = show_effective_config().unwrap();
        let _: NexusConfig = toml::from_str(&text).unwrap();
    }
}
