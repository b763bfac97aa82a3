#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use batch::config::RunConfig;
use batch::types::OutputFallback;

/// Shell used by tests that spawn real processes.
pub const TEST_SHELL: &str = "/bin/sh";

/// Builder for `RunConfig` to simplify test setup.
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Serial run through `/bin/sh`, output discarded.
    pub fn new() -> Self {
        Self {
            config: RunConfig {
                shell: Some(PathBuf::from(TEST_SHELL)),
                ..RunConfig::default()
            },
        }
    }

    pub fn parallelism(mut self, n: usize) -> Self {
        self.config.parallelism = NonZeroUsize::new(n).expect("parallelism must be >= 1");
        self
    }

    pub fn job_log(mut self, dir: &Path) -> Self {
        self.config.job_log = true;
        self.config.log_dir = dir.to_path_buf();
        self
    }

    pub fn shell(mut self, shell: Option<&str>) -> Self {
        self.config.shell = shell.map(PathBuf::from);
        self
    }

    pub fn fallback_output(mut self, fallback: OutputFallback) -> Self {
        self.config.fallback_output = fallback;
        self
    }

    pub fn build(self) -> RunConfig {
        self.config
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
