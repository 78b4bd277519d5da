//! Common test utilities for integration tests

use std::fs;
use std::io::Write;
use std::path::Path;

use lib::EtlConfig;

/// Helper function to create an input file in a directory
#[allow(dead_code)]
pub fn create_input_file(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::File::create(dir.join(name))
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Config whose inputs, output and log all live in `dir`
#[allow(dead_code)]
pub fn config_in(dir: &Path) -> EtlConfig {
    EtlConfig {
        log_path: dir.join("log_file.txt"),
        output_path: dir.join("transformed_data.csv"),
        input_directory: dir.to_path_buf(),
    }
}

/// Three people in delimited text
#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "name,height,weight
alex,65.78,112.99
ajay,71.52,136.49
alice,69.40,153.03
";

/// Two people, one JSON object per line
#[allow(dead_code)]
pub const SAMPLE_JSON: &str = r#"{"name":"jack","height":68.69,"weight":112.37}
{"name":"tom","height":70.0,"weight":150.0}
"#;

/// Two people in markup
#[allow(dead_code)]
pub const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<data>
  <person>
    <name>simon</name>
    <height>67.90</height>
    <weight>112.37</weight>
  </person>
  <person>
    <name>jacob</name>
    <height>66.78</height>
    <weight>120.67</weight>
  </person>
</data>"#;

/// Markup whose only person lacks a weight
#[allow(dead_code)]
pub const XML_MISSING_WEIGHT: &str = r#"<data>
  <person>
    <name>simon</name>
    <height>67.90</height>
  </person>
</data>"#;
