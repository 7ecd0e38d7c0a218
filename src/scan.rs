//! # Manifest Scanning
//!
//! Reads the repository's `go.mod` and extracts the handful of facts that
//! influence what gets generated: the module path, the Go version, the
//! direct dependencies and a few flags derived from which libraries are
//! required.
//!
//! The parser understands the go.mod grammar as far as the facts need it:
//! `module`, `go`, `toolchain`, `godebug`, `require`, `replace`, `exclude`
//! and `retract` directives, both as single lines and as parenthesized
//! blocks, `//` comments, quoted paths, and the `// indirect` marker on
//! requirements. Anything else is a parse error.

use crate::constants::MOD_FILENAME;
use crate::error::{Error, Result};
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

/// Module that provides `bininfo`; new enough versions let us inject build
/// metadata with linker flags.
const BININFO_MODULE: &str = "github.com/sapcc/go-api-declarations";
const BININFO_MIN_VERSION: semver::Version = semver::Version::new(1, 2, 0);

/// PostgreSQL drivers whose presence means the tests need a database.
const POSTGRES_DRIVERS: &[&str] = &["github.com/lib/pq", "github.com/jackc/pgx/v5"];

/// Namespace of the Kubernetes client libraries.
pub const K8S_IO_PREFIX: &str = "k8s.io/";

/// A `path version` pair from a `require` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleVersion {
    pub path: String,
    pub version: String,
}

/// Facts obtained by scanning `go.mod`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// From the `module` directive, e.g. `github.com/foo/bar`.
    pub module_path: Option<String>,
    /// From the `go` directive, e.g. `1.21`.
    pub go_version: Option<String>,
    /// From `require` directives without the `// indirect` comment, in file
    /// order.
    pub go_direct_dependencies: Vec<ModuleVersion>,
    /// Whether `bininfo` linker flags can be produced.
    pub has_bin_info: bool,
    /// Whether a PostgreSQL driver is required.
    pub uses_postgres: bool,
    /// Whether any direct dependency lives under `k8s.io/`.
    pub has_k8s_io_deps: bool,
}

impl ScanResult {
    /// Returns the module path, failing if `go.mod` has no `module` directive.
    pub fn require_module_path(&self) -> Result<&str> {
        self.module_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| Error::MissingModulePath {
                path: MOD_FILENAME.to_string(),
            })
    }
}

/// Reads and scans the manifest at `path`.
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<ScanResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::Filesystem {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;
    scan(&path.display().to_string(), &bytes)
}

/// Scans the raw contents of a go.mod file. `filename` is only used in error
/// messages.
pub fn scan(filename: &str, contents: &[u8]) -> Result<ScanResult> {
    let parsed = parse_mod_file(filename, contents)?;

    let mut result = ScanResult {
        module_path: parsed.module,
        go_version: parsed.go,
        ..Default::default()
    };

    for req in parsed.require {
        if req.module.path == BININFO_MODULE && version_at_least(&req.module, &BININFO_MIN_VERSION)
        {
            result.has_bin_info = true;
        }
        if POSTGRES_DRIVERS.contains(&req.module.path.as_str()) {
            result.uses_postgres = true;
        }
        if !req.indirect {
            if req.module.path.starts_with(K8S_IO_PREFIX) {
                result.has_k8s_io_deps = true;
            }
            result.go_direct_dependencies.push(req.module);
        }
    }

    debug!(
        "scanned {}: module={:?} go={:?} direct_deps={} bininfo={} postgres={} k8s.io={}",
        filename,
        result.module_path,
        result.go_version,
        result.go_direct_dependencies.len(),
        result.has_bin_info,
        result.uses_postgres,
        result.has_k8s_io_deps,
    );

    Ok(result)
}

/// Compares a Go module version (`v1.2.3`, possibly a pseudo-version)
/// against `min`.
fn version_at_least(module: &ModuleVersion, min: &semver::Version) -> bool {
    let raw = module.version.strip_prefix('v').unwrap_or(&module.version);
    match semver::Version::parse(raw) {
        Ok(version) => version >= *min,
        Err(e) => {
            warn!(
                "ignoring unparseable version {:?} of {}: {}",
                module.version, module.path, e
            );
            false
        }
    }
}

#[derive(Debug, Default)]
struct ModFile {
    module: Option<String>,
    go: Option<String>,
    require: Vec<Require>,
}

#[derive(Debug)]
struct Require {
    module: ModuleVersion,
    indirect: bool,
}

fn go_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([1-9][0-9]*)\.(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))?([a-z]+[0-9]+)?$")
            .expect("go version regex is valid")
    })
}

struct Parser<'a> {
    filename: &'a str,
    file: ModFile,
}

impl<'a> Parser<'a> {
    fn error(&self, line: usize, message: impl Into<String>) -> Error {
        Error::ManifestParse {
            path: self.filename.to_string(),
            line,
            message: message.into(),
        }
    }

    fn directive(&mut self, line: usize, verb: &str, args: &[String], comment: &str) -> Result<()> {
        match verb {
            "module" => {
                if self.file.module.is_some() {
                    return Err(self.error(line, "repeated module statement"));
                }
                let [path] = args else {
                    return Err(self.error(line, "usage: module module/path"));
                };
                self.file.module = Some(path.clone());
            }
            "go" => {
                if self.file.go.is_some() {
                    return Err(self.error(line, "repeated go statement"));
                }
                let [version] = args else {
                    return Err(self.error(line, "go directive expects exactly one argument"));
                };
                if !go_version_regex().is_match(version) {
                    return Err(self.error(
                        line,
                        format!("invalid go version '{}': must match format 1.23.0", version),
                    ));
                }
                self.file.go = Some(version.clone());
            }
            "toolchain" => {
                if args.len() != 1 {
                    return Err(self.error(line, "toolchain directive expects exactly one argument"));
                }
            }
            "require" => {
                let [path, version] = args else {
                    return Err(self.error(line, "usage: require module/path v1.2.3"));
                };
                self.file.require.push(Require {
                    module: ModuleVersion {
                        path: path.clone(),
                        version: version.clone(),
                    },
                    indirect: is_indirect(comment),
                });
            }
            "replace" | "exclude" | "retract" | "godebug" => {
                if args.is_empty() {
                    return Err(self.error(line, format!("{} directive needs arguments", verb)));
                }
            }
            _ => return Err(self.error(line, format!("unknown directive: {}", verb))),
        }
        Ok(())
    }
}

fn parse_mod_file(filename: &str, contents: &[u8]) -> Result<ModFile> {
    let text = std::str::from_utf8(contents).map_err(|e| Error::ManifestParse {
        path: filename.to_string(),
        line: 1,
        message: format!("file is not valid UTF-8: {}", e),
    })?;

    let mut parser = Parser {
        filename,
        file: ModFile::default(),
    };
    // verb and starting line of the currently open `verb (` block
    let mut block: Option<(String, usize)> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let (code, comment) = split_comment(raw_line);
        let tokens = tokenize(code).map_err(|message| parser.error(line, message))?;
        if tokens.is_empty() {
            continue;
        }

        if let Some((verb, _)) = &block {
            if tokens.len() == 1 && tokens[0] == ")" {
                block = None;
                continue;
            }
            if tokens.iter().any(|t| t == "(" || t == ")") {
                return Err(parser.error(line, "unexpected parenthesis inside block"));
            }
            let verb = verb.clone();
            parser.directive(line, &verb, &tokens, comment)?;
            continue;
        }

        let verb = tokens[0].as_str();
        let args = &tokens[1..];
        match args {
            [open] if open == "(" => {
                if verb == "module" || verb == "go" || verb == "toolchain" {
                    return Err(parser.error(line, format!("{} directive cannot be a block", verb)));
                }
                block = Some((verb.to_string(), line));
            }
            [open, close] if open == "(" && close == ")" => {}
            _ => parser.directive(line, verb, args, comment)?,
        }
    }

    if let Some((verb, start)) = block {
        return Err(parser.error(
            start,
            format!("unterminated {} block (missing closing parenthesis)", verb),
        ));
    }

    Ok(parser.file)
}

/// Splits a line into its code part and the text of a trailing `//`
/// comment. `//` inside a quoted string does not start a comment.
fn split_comment(line: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev_slash = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '/' && prev_slash {
                    return (&line[..i - 1], line[i + 1..].trim());
                }
                if c == '"' || c == '`' {
                    quote = Some(c);
                }
            }
        }
        prev_slash = quote.is_none() && c == '/';
    }
    (line, "")
}

/// Splits the code part of a line into whitespace-separated tokens,
/// unquoting `"..."` and `` `...` `` strings. Parentheses are their own
/// tokens.
fn tokenize(code: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = code.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' || c == ')' {
            tokens.push(c.to_string());
            chars.next();
        } else if c == '"' || c == '`' {
            chars.next();
            let mut token = String::new();
            let mut closed = false;
            while let Some(inner) = chars.next() {
                if inner == c {
                    closed = true;
                    break;
                }
                if inner == '\\' && c == '"' {
                    match chars.next() {
                        Some(escaped) => token.push(escaped),
                        None => break,
                    }
                } else {
                    token.push(inner);
                }
            }
            if !closed {
                return Err("unterminated quoted string".to_string());
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&inner) = chars.peek() {
                if inner.is_whitespace() || inner == '(' || inner == ')' {
                    break;
                }
                token.push(inner);
                chars.next();
            }
            tokens.push(token);
        }
    }

    Ok(tokens)
}

/// Reports whether a requirement comment marks it as indirect. Matches
/// `// indirect` and `// indirect; other notes`.
fn is_indirect(comment: &str) -> bool {
    comment == "indirect" || comment.starts_with("indirect;")
}
