//! Read-only snapshot of the machine being audited.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::runner::{CommandOutput, CommandRunner, SystemRunner};
use crate::scanner;

/// Environment snapshot, search path, home directory and command runner.
///
/// Captured once and shared (behind `Arc`) by every provider during a run.
/// Nothing in it is mutated after construction.
pub struct Host {
    home: Option<PathBuf>,
    vars: HashMap<String, String>,
    search_path: Vec<PathBuf>,
    runner: Arc<dyn CommandRunner>,
}

impl Host {
    /// Snapshot the current process environment.
    pub fn current() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let search_path = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();

        Self {
            home: dirs::home_dir(),
            vars,
            search_path,
            runner: Arc::new(SystemRunner),
        }
    }

    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Value of `name` if set and non-empty.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Expand a `~/...` location against this host's home.
    pub fn expand(&self, path: &str) -> PathBuf {
        scanner::expand_home(path, self.home())
    }

    pub fn find_executable(&self, name: &str) -> Result<PathBuf> {
        scanner::find_executable(name, &self.search_path)
    }

    /// Run `program` with string-slice arguments.
    pub fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(program, &args)
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("home", &self.home)
            .field("vars", &self.vars.len())
            .field("search_path", &self.search_path)
            .finish_non_exhaustive()
    }
}

/// Builder for a synthetic [`Host`].
#[derive(Default)]
pub struct HostBuilder {
    home: Option<PathBuf>,
    vars: HashMap<String, String>,
    search_path: Vec<PathBuf>,
    runner: Option<Arc<dyn CommandRunner>>,
}

impl HostBuilder {
    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = dirs;
        self
    }

    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn build(self) -> Host {
        Host {
            home: self.home,
            vars: self.vars,
            search_path: self.search_path,
            runner: self.runner.unwrap_or_else(|| Arc::new(SystemRunner)),
        }
    }
}
