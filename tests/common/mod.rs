//! Common test utilities for vendorize integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A package with a `node_modules` directory, on disk
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the package root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a project whose package.json carries the given `"vendorize"` value
    pub fn new(vendorize: &str) -> Self {
        let project = Self::bare();
        project.write_file(
            "package.json",
            &format!(r#"{{ "name": "app", "version": "0.1.0", "vendorize": {vendorize} }}"#),
        );
        project
    }

    /// Create an empty project directory
    #[allow(dead_code)]
    pub fn bare() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Install a package under `node_modules`, with an optional version
    #[allow(dead_code)]
    pub fn install(&self, name: &str, version: Option<&str>) {
        let manifest = match version {
            Some(v) => format!(r#"{{ "name": "{name}", "version": "{v}" }}"#),
            None => format!(r#"{{ "name": "{name}" }}"#),
        };
        self.write_file(&format!("node_modules/{name}/package.json"), &manifest);
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}
