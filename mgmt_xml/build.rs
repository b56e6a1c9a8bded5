// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    document: DocumentLimits,
    grammar: GrammarLimits,
    emitter: EmitterLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_document_size: u64,
    large_document_threshold: u64,
    max_line_count: usize,
    performance_log_buffer_size: usize,
}

#[derive(serde::Deserialize)]
struct GrammarLimits {
    max_nesting_depth: usize,
    max_attributes_per_element: usize,
    max_list_items: usize,
}

#[derive(serde::Deserialize)]
struct EmitterLimits {
    max_operations: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_document: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MGMT_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=MGMT_CONFIG_DIR");

    let profile = env::var("MGMT_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("MGMT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives at the workspace root, one level above this crate
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_DOCUMENT_SIZE: u64 = 100_000_000;
    const ABSOLUTE_MAX_NESTING_DEPTH: usize = 256;
    const ABSOLUTE_MAX_OPERATIONS: usize = 1_000_000;

    if config.document.max_document_size > ABSOLUTE_MAX_DOCUMENT_SIZE {
        panic!("SECURITY: max_document_size exceeds absolute maximum");
    }

    if config.document.large_document_threshold > config.document.max_document_size {
        panic!("large_document_threshold must not exceed max_document_size");
    }

    if config.grammar.max_nesting_depth > ABSOLUTE_MAX_NESTING_DEPTH {
        panic!("SECURITY: max_nesting_depth exceeds absolute maximum");
    }

    // The deepest management construct sits nine elements below a server root
    if config.grammar.max_nesting_depth < 10 {
        panic!("max_nesting_depth too small for the management grammar (min: 10)");
    }

    if config.emitter.max_operations > ABSOLUTE_MAX_OPERATIONS {
        panic!("SECURITY: max_operations exceeds absolute maximum");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.document.max_document_size > 50_000_000 {
        panic!("PRODUCTION: max_document_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod document {{
        pub const MAX_DOCUMENT_SIZE: u64 = {};
        pub const LARGE_DOCUMENT_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
        pub const PERFORMANCE_LOG_BUFFER_SIZE: usize = {};
    }}

    pub mod grammar {{
        pub const MAX_NESTING_DEPTH: usize = {};
        pub const MAX_ATTRIBUTES_PER_ELEMENT: usize = {};
        pub const MAX_LIST_ITEMS: usize = {};
    }}

    pub mod emitter {{
        pub const MAX_OPERATIONS: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_DOCUMENT: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Document
        config.document.max_document_size,
        config.document.large_document_threshold,
        config.document.max_line_count,
        config.document.performance_log_buffer_size,
        // Grammar
        config.grammar.max_nesting_depth,
        config.grammar.max_attributes_per_element,
        config.grammar.max_list_items,
        // Emitter
        config.emitter.max_operations,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_document,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
