use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the worker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Worker behaviour
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Baseline compiler invocation
    #[serde(default)]
    pub javac: JavacConfig,

    /// Static-analysis plugin used by the augmented backend
    #[serde(default)]
    pub error_prone: ErrorProneConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the worker treats the augmented backend at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AugmentationMode {
    /// Refuse to start unless the augmented backend is available.
    #[default]
    Required,
    /// Fall back to baseline-only when the backend is missing, loudly.
    Optional,
    /// Never probe or use the augmented backend.
    Disabled,
}

impl AugmentationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Disabled => "disabled",
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkerConfig {
    /// Whether augmented compilation is required, optional, or disabled
    #[serde(default)]
    pub augmentation: AugmentationMode,
}

/// Baseline compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JavacConfig {
    /// Compiler executable, resolved through `PATH` when not absolute
    #[serde(default = "default_javac_program")]
    pub program: String,

    /// Options passed on every invocation, before request options
    #[serde(default)]
    pub extra_opts: Vec<String>,
}

fn default_javac_program() -> String {
    "javac".to_string()
}

impl Default for JavacConfig {
    fn default() -> Self {
        Self {
            program: default_javac_program(),
            extra_opts: Vec::new(),
        }
    }
}

/// Error Prone plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorProneConfig {
    /// Jars making up the plugin's processor path
    #[serde(default)]
    pub processor_path: Vec<PathBuf>,

    /// Flags appended to `-Xplugin:ErrorProne`, e.g. `-Xep:DeadException:WARN`
    #[serde(default)]
    pub flags: Vec<String>,

    /// JVM flags the plugin needs on recent JDKs
    #[serde(default = "default_jvm_flags")]
    pub jvm_flags: Vec<String>,
}

fn default_jvm_flags() -> Vec<String> {
    [
        "api.file",
        "api.main",
        "api.model",
        "parser",
        "processing",
        "tree",
        "util",
    ]
    .iter()
    .map(|pkg| format!("-J--add-exports=jdk.compiler/com.sun.tools.javac.{pkg}=ALL-UNNAMED"))
    .chain(
        ["code", "comp"]
            .iter()
            .map(|pkg| format!("-J--add-opens=jdk.compiler/com.sun.tools.javac.{pkg}=ALL-UNNAMED")),
    )
    .collect()
}

impl Default for ErrorProneConfig {
    fn default() -> Self {
        Self {
            processor_path: Vec::new(),
            flags: Vec::new(),
            jvm_flags: default_jvm_flags(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
