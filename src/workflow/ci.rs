//! The `CI` workflow: builds the binaries, runs the tests (optionally
//! against PostgreSQL or a Kubernetes envtest control plane) and reports
//! coverage.

use indexmap::IndexMap;

use super::{Job, Matrix, RunsOn, Service, Step, Strategy, Workflow};
use crate::constants::{COVERALLS_ACTION, DOWNLOAD_ARTIFACT_ACTION, UPLOAD_ARTIFACT_ACTION};
use crate::resolve::ResolvedConfig;

pub const NAME: &str = "CI";

const COVERAGE_ARTIFACT: &str = "code-coverage";
const COVERAGE_FILE: &str = "build/cover.out";

pub fn build(config: &ResolvedConfig) -> Option<Workflow> {
    let gh = config.github_workflow()?;
    if !gh.ci.enabled {
        return None;
    }

    let runner = RunsOn::for_runner(config.is_self_hosted_runner());
    let go_version = config.workflow_go_version();
    let mut workflow = Workflow::new(NAME, config.default_branch(), config.ci_ignore_paths());

    let has_build_job = config.is_application();
    if has_build_job {
        let mut build = Job::with_go("Build", runner.clone(), go_version);
        build.add_step(Step::run("Build all binaries", &["make build-all"]));
        if config.golang.enable_vendoring {
            build.add_step(Step::run(
                "Check if vendor directory is up to date",
                &["go mod tidy", "go mod vendor", "git diff --exit-code"],
            ));
        }
        workflow.jobs.insert("build".to_string(), build);
    }

    let mut test = Job::with_go("Test", test_runner(&gh.ci.run_on, &runner), go_version);
    if has_build_job {
        test.needs.push("build".to_string());
    }
    if gh.ci.run_on.len() > 1 {
        test.strategy = Some(Strategy {
            matrix: Matrix {
                os: gh.ci.run_on.clone(),
            },
        });
    }
    if config.postgres_enabled() {
        test.services
            .insert("postgres".to_string(), postgres_service(config.postgres_version()));
    }
    if gh.ci.kubernetes_envtest.enabled {
        test.add_step(Step::run(
            "Set up Kubernetes envtest",
            &[
                "go install sigs.k8s.io/controller-runtime/tools/setup-envtest@latest".to_string(),
                format!(
                    "echo \"KUBEBUILDER_ASSETS=$(setup-envtest use -p path {})\" >> \"$GITHUB_ENV\"",
                    config.kubernetes_envtest_version()
                ),
            ],
        ));
    }
    test.add_step(Step::run(
        "Run tests and generate coverage report",
        &[format!("make {}", COVERAGE_FILE)],
    ));
    if gh.ci.coveralls {
        test.add_step(
            Step::uses("Archive code coverage results", UPLOAD_ARTIFACT_ACTION)
                .with_input("name", COVERAGE_ARTIFACT)
                .with_input("path", COVERAGE_FILE),
        );
    }
    workflow.jobs.insert("test".to_string(), test);

    if gh.ci.coveralls {
        let mut coverage = Job::new("Code coverage report", runner);
        coverage.needs.push("test".to_string());
        coverage.add_step(
            Step::uses("Download coverage reports", DOWNLOAD_ARTIFACT_ACTION)
                .with_input("name", COVERAGE_ARTIFACT)
                .with_input("path", "build/"),
        );
        coverage.add_step(
            Step::uses("Upload coverage to Coveralls", COVERALLS_ACTION)
                .with_input("github-token", "${{ secrets.GITHUB_TOKEN }}")
                .with_input("file", COVERAGE_FILE)
                .with_input("format", "golang"),
        );
        workflow.jobs.insert("code_coverage".to_string(), coverage);
    }

    Some(workflow)
}

/// `ci.runOn` overrides the default runner: a single entry is used
/// directly, several entries become an OS matrix.
fn test_runner(run_on: &[String], default: &RunsOn) -> RunsOn {
    match run_on {
        [] => default.clone(),
        [only] => RunsOn::Label(only.clone()),
        _ => RunsOn::Label("${{ matrix.os }}".to_string()),
    }
}

fn postgres_service(version: &str) -> Service {
    let mut env = IndexMap::new();
    env.insert("POSTGRES_PASSWORD".to_string(), "postgres".to_string());
    Service {
        image: format!("postgres:{}", version),
        env,
        ports: vec!["54321:5432".to_string()],
        options: "--health-cmd pg_isready --health-interval 10s --health-timeout 5s --health-retries 5"
            .to_string(),
    }
}
