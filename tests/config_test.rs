// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件 + 环境变量分层覆盖
// ==========================================

use radiatool::config::{env_keys, AppConfig, ConfigError, ConfigManager};
use radiatool::logging::LogFormat;
use radiatool::MountKind;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_file_then_env_layering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "data_dir": "/srv/radiatool",
            "radiator_discount_pct": 15.0,
            "bracket_discount_pct": 5.0,
            "mount_kind": "floor",
            "log_format": "json"
        }"#,
    )
    .unwrap();

    let config = ConfigManager::with_file(&path)
        .load_with_env(env_of(&[
            (env_keys::BRACKET_DISCOUNT, "7,5"),
            (env_keys::LOCALE, "en"),
            (env_keys::MOUNT, "   "),
        ]))
        .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/srv/radiatool"));
    assert_eq!(config.radiator_discount_pct, 15.0);
    assert_eq!(config.bracket_discount_pct, 7.5);
    // 空白环境变量不覆盖
    assert_eq!(config.mount_kind, MountKind::Floor);
    assert_eq!(config.locale, "en");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.matrix_file, "Матрица.xlsx");
    assert_eq!(
        config.brackets_path(),
        PathBuf::from("/srv/radiatool").join("Кронштейны.xlsx")
    );
}

#[test]
fn test_explicit_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigManager::with_file(dir.path().join("missing.json")).load_with_env(env_of(&[]));
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let result = ConfigManager::with_file(&path).load_with_env(env_of(&[]));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_invalid_env_values() {
    let mut config = AppConfig::default();
    let result = ConfigManager::apply_env_overrides(
        &mut config,
        env_of(&[(env_keys::RADIATOR_DISCOUNT, "много")]),
    );
    assert!(matches!(result, Err(ConfigError::InvalidEnvValue { .. })));

    let result = ConfigManager::apply_env_overrides(
        &mut config,
        env_of(&[(env_keys::MOUNT, "потолок")]),
    );
    assert!(matches!(result, Err(ConfigError::InvalidMountKind(_))));

    let result = ConfigManager::apply_env_overrides(
        &mut config,
        env_of(&[(env_keys::LOG_FORMAT, "xml")]),
    );
    assert!(matches!(result, Err(ConfigError::InvalidEnvValue { .. })));
}

#[test]
fn test_env_data_dir_and_mount_label() {
    let mut config = AppConfig::default();
    ConfigManager::apply_env_overrides(
        &mut config,
        env_of(&[
            (env_keys::DATA_DIR, "/data/catalog"),
            (env_keys::MOUNT, "Без кронштейнов"),
        ]),
    )
    .unwrap();

    assert_eq!(config.matrix_path(), PathBuf::from("/data/catalog").join("Матрица.xlsx"));
    assert_eq!(config.mount_kind, MountKind::None);
}
