//! `.golangci.yaml` generation.

use serde::Serialize;

use crate::constants::AUTOGENERATED_HEADER;
use crate::error::Result;
use crate::resolve::ResolvedConfig;

pub const GOLANGCI_CONFIG_PATH: &str = ".golangci.yaml";

const ENABLED_LINTERS: &[&str] = &[
    "bodyclose",
    "dupl",
    "dupword",
    "durationcheck",
    "errcheck",
    "errname",
    "errorlint",
    "exportloopref",
    "gocheckcompilerdirectives",
    "gocritic",
    "gofmt",
    "goimports",
    "gosec",
    "gosimple",
    "govet",
    "ineffassign",
    "misspell",
    "nilerr",
    "nolintlint",
    "predeclared",
    "rowserrcheck",
    "sqlclosecheck",
    "staticcheck",
    "stylecheck",
    "tenv",
    "unconvert",
    "unparam",
    "unused",
    "usestdlibvars",
    "whitespace",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LintConfig {
    pub run: RunSettings,
    pub issues: IssueSettings,
    pub linters_settings: LintersSettings,
    pub linters: Linters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunSettings {
    pub timeout: String,
    pub modules_download_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IssueSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_dirs: Vec<String>,
    /// 0 disables the limit; every finding is reported.
    pub max_issues_per_linter: u32,
    pub max_same_issues: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintersSettings {
    pub errcheck: ErrcheckSettings,
    pub misspell: MisspellSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ErrcheckSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_functions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MisspellSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Linters {
    pub disable_all: bool,
    pub enable: Vec<String>,
}

/// Builds the lint configuration, or `None` unless
/// `golangciLint.createConfig` is set.
pub fn build(config: &ResolvedConfig) -> Option<LintConfig> {
    let lint = &config.golangci_lint;
    if !lint.create_config {
        return None;
    }

    let modules_download_mode = if config.golang.enable_vendoring {
        "vendor"
    } else {
        "readonly"
    };

    Some(LintConfig {
        run: RunSettings {
            timeout: "3m".to_string(),
            modules_download_mode: modules_download_mode.to_string(),
        },
        issues: IssueSettings {
            exclude_dirs: lint.skip_dirs.clone(),
            max_issues_per_linter: 0,
            max_same_issues: 0,
        },
        linters_settings: LintersSettings {
            errcheck: ErrcheckSettings {
                exclude_functions: lint.errcheck_excludes.clone(),
            },
            misspell: MisspellSettings {
                ignore_words: config.spell_check.ignore_words.clone(),
            },
        },
        linters: Linters {
            disable_all: true,
            enable: ENABLED_LINTERS.iter().map(|s| s.to_string()).collect(),
        },
    })
}

impl LintConfig {
    /// Banner, blank line, YAML.
    pub fn render(&self) -> Result<String> {
        Ok(format!(
            "{}\n\n{}",
            AUTOGENERATED_HEADER,
            crate::yaml::to_string(self)?
        ))
    }
}
