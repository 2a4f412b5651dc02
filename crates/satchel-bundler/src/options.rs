//! Build options for a single bundling attempt.

use std::path::PathBuf;

use crate::{Error, OutputFormat, Platform, Result, SharedPluginable, SourceMapType};

/// Configuration for one bundling attempt.
///
/// Constructed once per invocation by the build driver, consumed by
/// [`crate::build`], and discarded. Use the builder methods for ergonomic
/// assembly.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Entry point, relative to `cwd` or absolute.
    pub entry: String,

    /// Bare output file name, e.g. `main.js`. The bundle is written under the
    /// project directory by [`crate::write_bundle`].
    pub output_name: String,

    /// Output module format (default: CommonJS for synchronous-require hosts).
    pub format: OutputFormat,

    /// Target runtime platform (default: Node).
    pub platform: Platform,

    /// Source map generation strategy (default: disabled).
    pub sourcemap: Option<SourceMapType>,

    /// Module names that stay external and must be resolvable by the host.
    pub external: Vec<String>,

    /// Comment block prepended to the written bundle.
    pub banner: Option<String>,

    /// Rolldown plugins to apply during bundling.
    pub plugins: Vec<SharedPluginable>,

    /// Working directory for module resolution (default: current directory).
    pub cwd: Option<PathBuf>,
}

impl BuildOptions {
    /// Create options for bundling `entry` into the single file `output_name`.
    pub fn new(entry: impl Into<String>, output_name: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            output_name: output_name.into(),
            format: OutputFormat::Cjs,
            platform: Platform::Node,
            sourcemap: None,
            external: Vec::new(),
            banner: None,
            plugins: Vec::new(),
            cwd: None,
        }
    }

    /// Add external module names that should not be bundled.
    pub fn external<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pkg in packages {
            let value = pkg.into();
            if !self.external.contains(&value) {
                self.external.push(value);
            }
        }
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the target platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Append an inline source map to the bundle.
    pub fn sourcemap_inline(mut self) -> Self {
        self.sourcemap = Some(SourceMapType::Inline);
        self
    }

    /// Set the banner comment prepended to the written bundle.
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Add a rolldown plugin.
    pub fn plugin(mut self, plugin: SharedPluginable) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Set the working directory for module resolution.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The chunk name rolldown uses so the emitted file matches `output_name`.
    pub(crate) fn chunk_name(&self) -> &str {
        self.output_name
            .strip_suffix(".js")
            .unwrap_or(&self.output_name)
    }

    /// Validate the options for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(Error::InvalidConfig("entry point is required".into()));
        }
        if self.output_name.is_empty() {
            return Err(Error::InvalidConfig("output file name is required".into()));
        }
        if self.output_name.contains('/') || self.output_name.contains('\\') {
            return Err(Error::InvalidConfig(format!(
                "output file name must be a bare file name, got '{}'",
                self.output_name
            )));
        }
        if !self.output_name.ends_with(".js") {
            return Err(Error::InvalidConfig(format!(
                "output file name must end in .js, got '{}'",
                self.output_name
            )));
        }
        Ok(())
    }

    /// Execute the build with these options.
    pub async fn build(self) -> Result<crate::BundleOutput> {
        crate::executor::build(self).await
    }
}
