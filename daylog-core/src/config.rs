use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "DAYLOG")]
#[allow(non_snake_case)]
pub struct DaylogConfig {
    #[from_env(default = "true")]
    pub DEBUG: bool,
    #[from_env(default = "logs")]
    pub DIR_NAME: String,
    #[from_env(default = "0")]
    pub RETENTION_DAYS: u64,
    #[from_env(default = "false")]
    pub DAY_OF_MONTH_ROTATION: bool,
    #[from_env(default = "false")]
    pub NO_COLOR: bool,
}

impl Default for DaylogConfig {
    fn default() -> Self {
        Self {
            DEBUG: true,
            DIR_NAME: "logs".into(),
            RETENTION_DAYS: 0,
            DAY_OF_MONTH_ROTATION: false,
            NO_COLOR: false,
        }
    }
}

/// Environment configuration, read once. Unparsable values fall back to defaults.
pub static DAYLOG_CONFIG: LazyLock<DaylogConfig> =
    LazyLock::new(|| DaylogConfig::from_env().unwrap_or_default());

#[test]
fn test_default_config() {
    let config = DaylogConfig::default();
    assert!(config.DEBUG);
    assert_eq!(config.DIR_NAME, "logs");
    assert_eq!(config.RETENTION_DAYS, 0);
    assert!(!config.DAY_OF_MONTH_ROTATION);
    assert!(!config.NO_COLOR);
}
