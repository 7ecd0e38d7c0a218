//! # Container Recipe
//!
//! Builds the multi-stage `Dockerfile` and its `.dockerignore`.
//!
//! The first stage compiles everything with `make install` inside a golang
//! image; the second stage is a minimal alpine image that receives the
//! installed files. Unless `dockerfile.runAsRoot` is set, the final image
//! runs as `appuser` (UID/GID 4200) from `/home/appuser`.

use crate::constants::{
    AUTOGENERATED_HEADER, DEFAULT_ALPINE_IMAGE, DEFAULT_GOLANG_IMAGE_PREFIX,
    DEFAULT_LINKERD_AWAIT_VERSION,
};
use crate::error::{Error, Result};
use crate::resolve::ResolvedConfig;

pub const DOCKERFILE_PATH: &str = "Dockerfile";
pub const DOCKERIGNORE_PATH: &str = ".dockerignore";

/// Paths that never belong in the build context.
const BASE_IGNORES: &[&str] = &[
    ".dockerignore",
    ".github/",
    ".gitignore",
    ".goreleaser.yml",
    "/*.env*",
    ".golangci.yaml",
    "build/",
    "CONTRIBUTING.md",
    "Dockerfile",
    "docs/",
    "LICENSE*",
    "cicd-maker.yaml",
    "README.md",
    "report.html",
    "shell.nix",
    "/testing/",
];

const LINKERD_AWAIT_PATH: &str = "/usr/bin/linkerd-await";

/// Everything that varies between generated Dockerfiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub enable_vendoring: bool,
    /// Packages installed into the final image; `ca-certificates` first.
    pub packages: Vec<String>,
    pub run_as_root: bool,
    pub with_linkerd_await: bool,
    pub source_url: String,
    pub extra_directives: Vec<String>,
    /// Fully resolved, including the linkerd-await prefix.
    pub entrypoint: Vec<String>,
    pub ignores: Vec<String>,
}

/// Builds the recipe, or `None` when `dockerfile.enabled` is off.
pub fn build(config: &ResolvedConfig) -> Result<Option<Recipe>> {
    let dockerfile = &config.dockerfile;
    if !dockerfile.enabled {
        return Ok(None);
    }

    let mut entrypoint = if !dockerfile.entrypoint.is_empty() {
        dockerfile.entrypoint.clone()
    } else {
        let binary = config.binaries.first().ok_or_else(|| {
            Error::invalid_config(
                "dockerfile.entrypoint",
                "must be set when no binaries are declared",
            )
        })?;
        vec![format!("/usr/bin/{}", binary.name)]
    };
    // prefixed after the fallback so that it wraps either form
    if dockerfile.with_linkerd_await {
        let mut wrapped = vec![
            LINKERD_AWAIT_PATH.to_string(),
            "--shutdown".to_string(),
            "--".to_string(),
        ];
        wrapped.append(&mut entrypoint);
        entrypoint = wrapped;
    }

    let mut packages = vec!["ca-certificates".to_string()];
    packages.extend(dockerfile.extra_packages.iter().cloned());

    let mut ignores: Vec<String> = BASE_IGNORES.iter().map(|s| s.to_string()).collect();
    ignores.extend(dockerfile.extra_ignores.iter().cloned());

    Ok(Some(Recipe {
        enable_vendoring: config.golang.enable_vendoring,
        packages,
        run_as_root: dockerfile.run_as_root,
        with_linkerd_await: dockerfile.with_linkerd_await,
        source_url: config.metadata.url.clone(),
        extra_directives: dockerfile.extra_directives.clone(),
        entrypoint,
        ignores,
    }))
}

impl Recipe {
    pub fn working_dir(&self) -> &'static str {
        if self.run_as_root {
            "/"
        } else {
            "/home/appuser"
        }
    }

    /// Renders the `Dockerfile`.
    pub fn dockerfile(&self) -> Result<String> {
        let go_buildflags = if self.enable_vendoring {
            " GO_BUILDFLAGS='-mod vendor'"
        } else {
            ""
        };

        let add_user_group = if self.run_as_root {
            ""
        } else {
            "RUN addgroup -g 4200 appgroup \\\n  && adduser -h /home/appuser -s /sbin/nologin -G appgroup -D -u 4200 appuser\n\n"
        };

        let linkerd_await = if self.with_linkerd_await {
            format!(
                "\nRUN wget -qO {path} https://github.com/linkerd/linkerd-await/releases/download/release%2Fv{v}/linkerd-await-v{v}-amd64 \\\n  && chmod 755 {path}\n",
                path = LINKERD_AWAIT_PATH,
                v = DEFAULT_LINKERD_AWAIT_VERSION,
            )
        } else {
            String::new()
        };

        let mut extra_directives = self.extra_directives.join("\n");
        if !extra_directives.is_empty() {
            extra_directives.push('\n');
        }

        // numeric IDs let Kubernetes verify `runAsNonRoot` without an
        // explicit `runAsUser`
        let user = if self.run_as_root { "" } else { "USER 4200:4200\n" };

        // exec form is a JSON array
        let entrypoint = self
            .entrypoint
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join(", ");

        Ok(format!(
            r#"{header}

FROM golang:{golang}{alpine} AS builder

RUN apk add --no-cache --no-progress gcc git make musl-dev

COPY . /src
ARG BININFO_BUILD_DATE BININFO_COMMIT_HASH BININFO_VERSION # provided to 'make install'
RUN make -C /src install PREFIX=/pkg GOTOOLCHAIN=local{go_buildflags}

################################################################################

FROM alpine:{alpine}

{add_user_group}# upgrade all installed packages to fix potential CVEs in advance
# also remove the apk package manager, it is not needed at runtime
RUN apk upgrade --no-cache --no-progress \
  && apk add --no-cache --no-progress {packages} \
  && apk del --no-cache --no-progress apk-tools alpine-keys
{linkerd_await}
COPY --from=builder /pkg/ /usr/

ARG BININFO_BUILD_DATE BININFO_COMMIT_HASH BININFO_VERSION
LABEL source_repository="{url}" \
  org.opencontainers.image.url="{url}" \
  org.opencontainers.image.created=${{BININFO_BUILD_DATE}} \
  org.opencontainers.image.revision=${{BININFO_COMMIT_HASH}} \
  org.opencontainers.image.version=${{BININFO_VERSION}}

{extra_directives}{user}WORKDIR {workdir}
ENTRYPOINT [ {entrypoint} ]
"#,
            header = AUTOGENERATED_HEADER,
            golang = DEFAULT_GOLANG_IMAGE_PREFIX,
            alpine = DEFAULT_ALPINE_IMAGE,
            packages = self.packages.join(" "),
            url = self.source_url,
            workdir = self.working_dir(),
        ))
    }

    /// Renders the `.dockerignore`: baseline entries, then the configured
    /// extras.
    pub fn dockerignore(&self) -> String {
        format!("{}\n\n{}\n", AUTOGENERATED_HEADER, self.ignores.join("\n"))
    }
}
