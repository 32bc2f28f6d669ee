//! Configuration precedence: defaults < YAML file < environment.

use std::io::Write;
use tempfile::NamedTempFile;

use javac_worker::domain::models::AugmentationMode;
use javac_worker::ConfigLoader;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_apply_without_file_or_env() {
    let file = yaml_file("{}\n");
    temp_env::with_vars_unset(
        ["JAVAC_WORKER_WORKER__AUGMENTATION", "JAVAC_WORKER_LOGGING__LEVEL"],
        || {
            let config = ConfigLoader::load(Some(file.path())).unwrap();
            assert_eq!(config.worker.augmentation, AugmentationMode::Required);
            assert_eq!(config.javac.program, "javac");
            assert_eq!(config.logging.level, "info");
            assert!(config.error_prone.processor_path.is_empty());
        },
    );
}

#[test]
fn test_environment_overrides_file() {
    let file = yaml_file(
        "worker:\n  augmentation: disabled\n\
         logging:\n  level: warn\n  format: pretty\n\
         error_prone:\n  processor_path:\n    - /opt/ep/error_prone_core.jar\n",
    );

    temp_env::with_vars(
        [
            ("JAVAC_WORKER_WORKER__AUGMENTATION", Some("optional")),
            ("JAVAC_WORKER_LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let config = ConfigLoader::load(Some(file.path())).unwrap();
            assert_eq!(config.worker.augmentation, AugmentationMode::Optional);
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.logging.format, "pretty", "file value survives");
            assert_eq!(config.error_prone.processor_path.len(), 1);
        },
    );
}

#[test]
fn test_invalid_env_value_is_rejected() {
    let file = yaml_file("{}\n");
    temp_env::with_var("JAVAC_WORKER_LOGGING__LEVEL", Some("chatty"), || {
        let err = ConfigLoader::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    });
}
