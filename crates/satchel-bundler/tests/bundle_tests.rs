//! End-to-end bundling tests against a real temp project.
//!
//! Each test lays out a small TypeScript project in a temp directory, runs a
//! full build through rolldown with the real plugins, and inspects the
//! generated chunk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tempfile::TempDir;

use satchel_bundler::{BuildOptions, BundleOutput, Error, Output};
use satchel_plugin_toml::TomlPlugin;
use satchel_plugin_wasm::WasmPlugin;

const WASM_MAGIC: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

fn write_file(dir: &Path, rel: &str, content: &[u8]) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn entry_chunk_code(output: &BundleOutput) -> String {
    for item in &output.assets {
        if let Output::Chunk(chunk) = item {
            if chunk.filename.as_str().ends_with(".js") {
                return chunk.code.to_string();
            }
        }
    }
    panic!("no .js chunk in bundle output");
}

#[tokio::test]
async fn bundles_a_plain_entry() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        "src/main.ts",
        b"const greeting: string = \"hello\";\nconsole.log(greeting);\n",
    );

    let output = BuildOptions::new("src/main.ts", "main.js")
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let code = entry_chunk_code(&output);
    assert!(code.contains("hello"));
}

#[tokio::test]
async fn externals_stay_unbundled() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        "src/main.ts",
        b"import { Plugin } from \"obsidian\";\nexport class Main extends Plugin {}\n",
    );

    let output = BuildOptions::new("src/main.ts", "main.js")
        .external(["obsidian"])
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let code = entry_chunk_code(&output);
    // The external stays a require, its module body is not inlined
    assert!(code.contains("obsidian"));
    assert!(code.contains("require"));
}

#[tokio::test]
async fn wasm_imports_are_embedded_as_base64() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/tokenizer.wasm", WASM_MAGIC);
    write_file(
        project.path(),
        "src/main.ts",
        b"import wasm from \"./tokenizer.wasm\";\nconsole.log(wasm);\n",
    );

    let output = BuildOptions::new("src/main.ts", "main.js")
        .plugin(Arc::new(WasmPlugin::new()))
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let code = entry_chunk_code(&output);
    assert!(code.contains(&BASE64.encode(WASM_MAGIC)));
}

#[tokio::test]
async fn toml_imports_become_json_data() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        "src/settings.toml",
        b"name = \"satchel\"\nlimit = 7\n",
    );
    write_file(
        project.path(),
        "src/main.ts",
        b"import settings from \"./settings.toml\";\nconsole.log(settings);\n",
    );

    let output = BuildOptions::new("src/main.ts", "main.js")
        .plugin(Arc::new(TomlPlugin::new()))
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let code = entry_chunk_code(&output);
    assert!(code.contains("satchel"));
    assert!(code.contains('7'));
}

#[tokio::test]
async fn inline_sourcemap_is_appended() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/main.ts", b"console.log(1);\n");

    let output = BuildOptions::new("src/main.ts", "main.js")
        .sourcemap_inline()
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let code = entry_chunk_code(&output);
    assert!(code.contains("sourceMappingURL=data:application/json"));
}

#[tokio::test]
async fn missing_entry_is_a_bundler_error() {
    let project = TempDir::new().unwrap();

    let result = BuildOptions::new("src/main.ts", "main.js")
        .cwd(project.path())
        .build()
        .await;

    assert!(matches!(result, Err(Error::Bundler(_))));
}

#[tokio::test]
async fn missing_wasm_file_fails_the_build() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        "src/main.ts",
        b"import wasm from \"./absent.wasm\";\nconsole.log(wasm);\n",
    );

    let result = BuildOptions::new("src/main.ts", "main.js")
        .plugin(Arc::new(WasmPlugin::new()))
        .cwd(project.path())
        .build()
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn built_bundle_round_trips_through_the_writer() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/main.ts", b"console.log(1);\n");

    let output = BuildOptions::new("src/main.ts", "main.js")
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    satchel_bundler::write_bundle(&output, project.path(), Some("/* generated */")).unwrap();

    let written = fs::read_to_string(project.path().join("main.js")).unwrap();
    assert!(written.starts_with("/* generated */\n"));
}

fn inline_mappings(code: &str) -> String {
    let payload_start = code.rfind(";base64,").unwrap() + ";base64,".len();
    let payload = code[payload_start..].split_whitespace().next().unwrap();
    let map: serde_json::Value =
        serde_json::from_slice(&BASE64.decode(payload).unwrap()).unwrap();
    map["mappings"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn written_banner_keeps_the_sourcemap_accurate() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/main.ts", b"console.log(1);\n");

    let output = BuildOptions::new("src/main.ts", "main.js")
        .sourcemap_inline()
        .cwd(project.path())
        .build()
        .await
        .unwrap();

    let original = inline_mappings(&entry_chunk_code(&output));

    let banner = "/*\ngenerated file\n*/";
    satchel_bundler::write_bundle(&output, project.path(), Some(banner)).unwrap();

    let written = fs::read_to_string(project.path().join("main.js")).unwrap();
    assert!(written.starts_with(banner));
    // The three banner lines show up as three empty generated lines
    assert_eq!(inline_mappings(&written), format!(";;;{}", original));
}
