use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_VAR: &str = "PV_DASHBOARD_CONFIG";
pub const DATA_DIR_VAR: &str = "PV_DASHBOARD_DATA_DIR";
pub const ADDR_VAR: &str = "PV_DASHBOARD_ADDR";

/// Runtime settings of the dashboard.
///
/// Sources, lowest precedence first: defaults, the JSON file named by
/// `PV_DASHBOARD_CONFIG`, the `PV_DASHBOARD_*` variables, positional arguments.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the source workbooks
    pub data_dir: PathBuf,
    /// Address the web server binds to
    pub bind_addr: String,
    /// Rendered chart width in pixels
    pub chart_width: u32,
    /// Rendered chart height in pixels
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind_addr: "127.0.0.1:3000".to_string(),
            chart_width: 1000,
            chart_height: 600,
        }
    }
}

impl DashboardConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Builds the config from the environment and `args` (`[data_dir] [bind_addr]`).
    pub fn load(args: &[String]) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match env::var(CONFIG_FILE_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(dir) = env::var(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = env::var(ADDR_VAR) {
            config.bind_addr = addr;
        }

        config.apply_args(args);
        Ok(config)
    }

    /// Positional overrides: data directory, then bind address.
    pub fn apply_args(&mut self, args: &[String]) {
        if let Some(dir) = args.first() {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = args.get(1) {
            self.bind_addr = addr.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "data_dir": "/srv/pv", "chart_width": 1200 }"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/pv"));
        assert_eq!(config.chart_width, 1200);
        assert_eq!(config.chart_height, 600);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn positional_args_override() {
        let mut config = DashboardConfig::default();
        config.apply_args(&["xlsx".to_string()]);
        assert_eq!(config.data_dir, PathBuf::from("xlsx"));
        assert_eq!(config.bind_addr, "127.0.0.1:3000");

        config.apply_args(&["xlsx".to_string(), "0.0.0.0:8080".to_string()]);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn file_then_env_then_args() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dashboard.json");
        std::fs::write(
            &file,
            r#"{ "data_dir": "/srv/pv", "bind_addr": "0.0.0.0:80", "chart_height": 720 }"#,
        )
        .unwrap();

        let from_file = DashboardConfig::from_file(&file).unwrap();
        assert_eq!(from_file.data_dir, PathBuf::from("/srv/pv"));
        assert_eq!(from_file.chart_height, 720);
        assert_eq!(from_file.chart_width, 1000);

        // No other test in this crate reads these variables
        unsafe {
            env::set_var(CONFIG_FILE_VAR, &file);
            env::set_var(ADDR_VAR, "127.0.0.1:9000");
            env::remove_var(DATA_DIR_VAR);
        }

        let layered = DashboardConfig::load(&[]);
        let with_args = DashboardConfig::load(&["xlsx".to_string()]);
        unsafe {
            env::set_var(DATA_DIR_VAR, "/env/data");
        }
        let env_dir = DashboardConfig::load(&[]);
        unsafe {
            env::remove_var(CONFIG_FILE_VAR);
            env::remove_var(ADDR_VAR);
            env::remove_var(DATA_DIR_VAR);
        }

        let layered = layered.unwrap();
        assert_eq!(layered.data_dir, PathBuf::from("/srv/pv"));
        assert_eq!(layered.bind_addr, "127.0.0.1:9000");
        assert_eq!(layered.chart_height, 720);

        assert_eq!(with_args.unwrap().data_dir, PathBuf::from("xlsx"));
        assert_eq!(env_dir.unwrap().data_dir, PathBuf::from("/env/data"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dashboard.json");
        std::fs::write(&file, r#"{ "chart_width": "wide" }"#).unwrap();
        assert!(DashboardConfig::from_file(&file).is_err());
        assert!(DashboardConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
