//! Node builtin module names.
//!
//! These are always treated as externals: the plugin host runs on an
//! Electron-backed Node runtime where builtins resolve at require time, and
//! bundling them is neither possible nor wanted.

/// Builtin modules shipped with Node, bare names only.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// All Node builtin specifiers, both bare (`fs`) and prefixed (`node:fs`).
///
/// Imports may use either spelling, so both forms go on the externals list.
pub fn node_builtins() -> Vec<String> {
    let mut names = Vec::with_capacity(NODE_BUILTINS.len() * 2);
    for name in NODE_BUILTINS {
        names.push((*name).to_string());
        names.push(format!("node:{name}"));
    }
    names
}
