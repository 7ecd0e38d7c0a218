//! Default values and shared literals for cicd-maker.
//!
//! Everything here is a process-wide constant: versions of the base images
//! and tools that generated files pin, the GitHub Actions the workflows
//! reference, and the banner that every generated file with comment syntax
//! starts with.

/// Banner written at the top of every generated file that supports `#`
/// comments. Must stay byte-identical across runs.
pub const AUTOGENERATED_HEADER: &str = "\
################################################################################
# This file is AUTOGENERATED with <https://github.com/cicd-maker/cicd-maker>   #
# Edit cicd-maker.yaml instead.                                                #
################################################################################";

/// Name of the configuration file read by default.
pub const CONFIG_FILENAME: &str = "cicd-maker.yaml";

/// Name of the dependency manifest scanned for facts.
pub const MOD_FILENAME: &str = "go.mod";

pub const DEFAULT_ALPINE_IMAGE: &str = "3.18";
pub const DEFAULT_GOLANG_IMAGE_PREFIX: &str = "1.21.4-alpine";

pub const DEFAULT_GO_VERSION: &str = "1.21";
pub const DEFAULT_POSTGRES_VERSION: &str = "12";
pub const DEFAULT_LINKERD_AWAIT_VERSION: &str = "0.2.7";
pub const DEFAULT_K8S_ENVTEST_VERSION: &str = "1.26.x!";
/// Kubernetes version of the clusters the applications are deployed to.
pub const DEFAULT_K8S_VERSION: &str = "1.26";

pub const DEFAULT_GITHUB_COM_RUNNER_TYPE: &str = "ubuntu-latest";
pub const DEFAULT_GITHUB_ENTERPRISE_RUNNER_TYPE: [&str; 3] = ["self-hosted", "Linux", "X64"];

/// Host of the public GitHub instance; anything else is treated as an
/// internal instance with self-hosted runners.
pub const GITHUB_COM_HOST: &str = "github.com";

pub const CHECKOUT_ACTION: &str = "actions/checkout@v4";
pub const SETUP_GO_ACTION: &str = "actions/setup-go@v4";
pub const UPLOAD_ARTIFACT_ACTION: &str = "actions/upload-artifact@v3";
pub const DOWNLOAD_ARTIFACT_ACTION: &str = "actions/download-artifact@v3";
pub const DEPENDENCY_REVIEW_ACTION: &str = "actions/dependency-review-action@v3";

pub const DOCKER_LOGIN_ACTION: &str = "docker/login-action@v3";
pub const DOCKER_METADATA_ACTION: &str = "docker/metadata-action@v5";
pub const DOCKER_BUILD_PUSH_ACTION: &str = "docker/build-push-action@v5";

pub const CODEQL_INIT_ACTION: &str = "github/codeql-action/init@v2";
pub const CODEQL_ANALYZE_ACTION: &str = "github/codeql-action/analyze@v2";
pub const CODEQL_AUTOBUILD_ACTION: &str = "github/codeql-action/autobuild@v2";

pub const COVERALLS_ACTION: &str = "coverallsapp/github-action@v2";
pub const GOLANGCI_LINT_ACTION: &str = "golangci/golangci-lint-action@v3";
pub const GOVULNCHECK_ACTION: &str = "golang/govulncheck-action@v1";
pub const MISSPELL_ACTION: &str = "reviewdog/action-misspell@v1";
