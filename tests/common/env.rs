//! Test environment builder for isolated push testing.
//!
//! Provides `TestEnv` - temp directories for the project and for HOME, a
//! signing key, cookbook fixtures, and helpers to run the CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

use policy_push::domain::ports::CookbookStore;
use policy_push::infrastructure::FsCookbookStore;

use super::fixtures::*;

const PUSH_ENV_VARS: &[&str] = &[
    "POLICY_PUSH_SERVER_URL",
    "POLICY_PUSH_CLIENT_NAME",
    "POLICY_PUSH_CLIENT_KEY",
    "POLICY_PUSH_CACHE_PATH",
    "XDG_CONFIG_HOME",
    "RUST_LOG",
];

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            project_root: TempDir::new().expect("create project dir"),
            home_dir: TempDir::new().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_policy-push")),
        };
        env.write_home_file(".policy-push/deployer.key", CLIENT_KEY);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn key_path(&self) -> PathBuf {
        self.home_path(".policy-push/deployer.key")
    }

    /// Default cookbook cache under the test HOME
    pub fn cache_path(&self) -> PathBuf {
        self.home_path(".chefdk/cache/cookbooks")
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn write_home_file(&self, relative: &str, content: &str) {
        write_file(&self.home_path(relative), content);
    }

    /// Local `web_app` cookbook at `cookbooks/web_app`
    pub fn write_local_cookbook(&self) {
        self.write_project_file("cookbooks/web_app/metadata.json", WEB_APP_METADATA);
        self.write_project_file("cookbooks/web_app/recipes/default.rb", WEB_APP_RECIPE);
    }

    /// Cached `nginx` cookbook; returns its identifier
    pub fn write_cached_cookbook(&self) -> String {
        let dir = self.cache_path().join("nginx-2.7.6");
        write_file(&dir.join("metadata.json"), NGINX_METADATA);
        write_file(&dir.join("recipes/default.rb"), NGINX_RECIPE);

        FsCookbookStore::new()
            .profile(&dir)
            .expect("profile cached cookbook")
            .identifier
            .to_string()
    }

    /// Lock for the `web` policy using the local and cached cookbooks
    pub fn web_lock(&self, nginx_identifier: &str) -> Value {
        json!({
            "revision_id": "stale-revision",
            "name": "web",
            "run_list": ["recipe[web_app::default]", "recipe[nginx::default]"],
            "cookbook_locks": {
                "web_app": {
                    "version": "0.1.0",
                    "identifier": STALE_WEB_APP_ID,
                    "source": "cookbooks/web_app"
                },
                "nginx": {
                    "version": "2.7.6",
                    "identifier": nginx_identifier,
                    "cache_key": "nginx-2.7.6",
                    "origin": "https://supermarket.example.com/api/v1/cookbooks/nginx"
                }
            },
            "default_attributes": {"web": {"port": 8080}},
            "override_attributes": {},
            "solution_dependencies": {
                "Policyfile": [["nginx", ">= 0.0.0"]],
                "dependencies": {"nginx (2.7.6)": [], "web_app (0.3.0)": []}
            }
        })
    }

    pub fn write_lockfile(&self, relative: &str, lock: &Value) {
        let content = serde_json::to_string_pretty(lock).expect("encode lock");
        self.write_project_file(relative, &content);
    }

    pub fn read_lockfile(&self, relative: &str) -> Value {
        let content = fs::read_to_string(self.project_path(relative)).expect("read lockfile");
        serde_json::from_str(&content).expect("lockfile should be JSON")
    }

    /// Run the CLI from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run the CLI from the project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("POLICY_PUSH_TEST_HOME", self.home_dir.path());
        for key in PUSH_ENV_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute policy-push");
        output_to_result(output)
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write fixture");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
