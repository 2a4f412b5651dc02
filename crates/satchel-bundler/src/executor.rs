//! Build execution: turns [`BuildOptions`] into one rolldown invocation.

use rolldown::{BundlerBuilder, BundlerOptions, InputItem, IsExternal, ResolveOptions};

use crate::{BuildOptions, BundleOutput, Error, Result};

/// Execute a build with the given options.
///
/// Produces exactly one bundling attempt. Rolldown owns dependency graph
/// traversal, transformation, tree shaking, and source map generation; any
/// failure it reports (including plugin rejections) is surfaced as
/// [`Error::Bundler`].
pub async fn build(options: BuildOptions) -> Result<BundleOutput> {
    options.validate()?;

    let rolldown_options = configure_rolldown_options(&options)?;

    let mut bundler = BundlerBuilder::default()
        .with_options(rolldown_options)
        .with_plugins(options.plugins.clone())
        .build()
        .map_err(|e| Error::from_rolldown(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown(&e))?;

    Ok(bundle)
}

/// Configure rolldown options from build options.
///
/// The entry gets an explicit chunk name so the emitted file matches the
/// requested output name under rolldown's `[name].js` template.
fn configure_rolldown_options(options: &BuildOptions) -> Result<BundlerOptions> {
    let cwd = match &options.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let mut rolldown_options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some(options.chunk_name().to_string()),
            import: options.entry.clone(),
        }]),
        format: Some(options.format),
        sourcemap: options.sourcemap,
        platform: Some(options.platform),
        cwd: Some(cwd),
        ..Default::default()
    };

    rolldown_options.external = Some(IsExternal::from(options.external.clone()));

    rolldown_options.resolve = Some(ResolveOptions {
        extensions: Some(
            [".ts", ".tsx", ".js", ".mjs", ".json"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        ),
        symlinks: Some(true),
        ..Default::default()
    });

    Ok(rolldown_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_chunk_is_named_after_output_file() {
        let options = BuildOptions::new("tests/main.test.ts", "main.test.js").cwd("/tmp");
        let rolldown_options = configure_rolldown_options(&options).unwrap();

        let input = rolldown_options.input.unwrap();
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].name.as_deref(), Some("main.test"));
        assert_eq!(input[0].import, "tests/main.test.ts");
    }

    #[test]
    fn resolution_covers_typescript_sources() {
        let options = BuildOptions::new("src/main.ts", "main.js").cwd("/tmp");
        let rolldown_options = configure_rolldown_options(&options).unwrap();

        let extensions = rolldown_options.resolve.unwrap().extensions.unwrap();
        assert!(extensions.contains(&".ts".to_string()));
        assert!(extensions.contains(&".js".to_string()));
    }
}
