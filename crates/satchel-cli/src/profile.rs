//! Build profile selection.
//!
//! The two mode tokens map to two independent flags, and the four flag
//! combinations map to a declarative profile table. Everything else about a
//! build (format, platform, banner, externals) is fixed.

use satchel_bundler::node_builtins;

/// Comment block prepended to every written bundle.
pub const BANNER: &str = "/*\nTHIS IS A GENERATED/BUNDLED FILE BY SATCHEL\nif you want to view the source, please visit the github repository of this plugin\n*/";

/// Script target label for the emitted bundle.
pub const TARGET: &str = "es2020";

/// Modules provided by the host editor at require time, never bundled.
pub const EDITOR_EXTERNALS: &[&str] = &[
    "obsidian",
    "electron",
    "@codemirror/autocomplete",
    "@codemirror/closebrackets",
    "@codemirror/collab",
    "@codemirror/commands",
    "@codemirror/comment",
    "@codemirror/fold",
    "@codemirror/gutter",
    "@codemirror/highlight",
    "@codemirror/history",
    "@codemirror/language",
    "@codemirror/lint",
    "@codemirror/matchbrackets",
    "@codemirror/panel",
    "@codemirror/rangeset",
    "@codemirror/rectangular-selection",
    "@codemirror/search",
    "@codemirror/state",
    "@codemirror/stream-parser",
    "@codemirror/text",
    "@codemirror/tooltip",
    "@codemirror/view",
];

/// Immutable per-invocation build profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
    /// Optimized one-shot build, no source maps, no watch.
    pub production: bool,
    /// Bundle the test entry point instead of the plugin entry.
    pub test: bool,
    /// Entry point, relative to the project directory.
    pub entry: &'static str,
    /// Output file name in the project directory.
    pub output_name: &'static str,
    /// Append an inline source map to the bundle.
    pub sourcemap_inline: bool,
    /// Rebuild on file changes after the initial build.
    pub watch: bool,
    /// Script target label.
    pub target: &'static str,
    /// Dead-code elimination during bundling.
    pub tree_shaking: bool,
}

impl BuildProfile {
    /// Select the profile from the positional mode tokens.
    ///
    /// "production" counts only in first position; "test" counts in either.
    /// The two flags are independent, so `production test` gets the test
    /// entry with production's disabled source maps and watch.
    pub fn from_tokens(tokens: &[String]) -> Self {
        let production = tokens.first().is_some_and(|t| t == "production");
        let test = tokens.iter().any(|t| t == "test");
        Self::select(production, test)
    }

    fn select(production: bool, test: bool) -> Self {
        let (entry, output_name) = if test {
            ("tests/main.test.ts", "main.test.js")
        } else {
            ("src/main.ts", "main.js")
        };

        Self {
            production,
            test,
            entry,
            output_name,
            sourcemap_inline: !production,
            watch: !production,
            target: TARGET,
            tree_shaking: true,
        }
    }

    /// Full externals list: host-provided modules plus Node builtins.
    pub fn externals(&self) -> Vec<String> {
        let mut externals: Vec<String> =
            EDITOR_EXTERNALS.iter().map(|s| (*s).to_string()).collect();
        externals.extend(node_builtins());
        externals
    }

    /// Human-readable mode label for status output.
    pub fn label(&self) -> &'static str {
        match (self.production, self.test) {
            (false, false) => "dev",
            (true, false) => "production",
            (false, true) => "test",
            (true, true) => "production test",
        }
    }
}
