//! A throwaway machine for driving the binary: a private HOME, a config
//! dir, and a search path holding only fake toolchain scripts.

#![allow(dead_code)]

use assert_cmd::Command;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct Sandbox {
    root: TempDir,
    path_dirs: RefCell<Vec<PathBuf>>,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("home")).unwrap();
        fs::create_dir_all(root.path().join("config")).unwrap();
        Self {
            root,
            path_dirs: RefCell::new(Vec::new()),
        }
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("config")
    }

    /// Install an executable shell script at `~/<dir>/<name>` and put its
    /// directory on the search path.
    pub fn tool(&self, dir: &str, name: &str, body: &str) -> PathBuf {
        let dir = self.home().join(dir);
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join(name);
        fs::write(&file, format!("#!/bin/sh\n{}\n", body)).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let mut dirs = self.path_dirs.borrow_mut();
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
        file
    }

    /// Write `bytes` bytes at `~/<rel>`, creating parents.
    pub fn file(&self, rel: &str, bytes: usize) -> PathBuf {
        let path = self.home().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, vec![b'x'; bytes]).unwrap();
        path
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.home().join(rel).exists()
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("depsweep.toml");
        fs::write(&path, content).unwrap();
        path
    }

    /// The binary, isolated from the real environment.
    pub fn cmd(&self) -> Command {
        let path = std::env::join_paths(self.path_dirs.borrow().iter()).unwrap();
        let mut cmd = Command::cargo_bin("depsweep").unwrap();
        cmd.env_clear()
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env("PATH", path)
            .current_dir(self.root.path());
        cmd
    }
}

pub fn fake_rustc(sandbox: &Sandbox) -> PathBuf {
    sandbox.tool(
        ".cargo/bin",
        "rustc",
        r#"echo "rustc 1.75.0 (82e1608df 2023-12-21)""#,
    )
}

/// A `go` that reports `~/gomod` as its module cache and can clean it.
pub fn fake_go(sandbox: &Sandbox) -> PathBuf {
    sandbox.tool(
        "sdk/go/bin",
        "go",
        r#"case "$1" in
  version) echo "go version go1.21.3 linux/amd64" ;;
  env)
    case "$2" in
      GOMODCACHE) echo "$HOME/gomod" ;;
      *) echo "" ;;
    esac ;;
  clean) /bin/rm -rf "$HOME/gomod" ;;
esac"#,
    )
}
