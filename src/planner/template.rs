//! Destination templates
//!
//! Copy destinations are written as `<package>/[path][name].[ext]` and
//! expanded per file by the build adapter:
//! - `[path]`: directory relative to the package root, with a trailing `/`,
//!   empty at the root
//! - `[name]`: file name without extension
//! - `[ext]`: extension without the dot; when empty, the `.` before it is
//!   dropped too

use crate::path_utils::split_request;

/// Per-file part of every destination template
pub const PATH_TEMPLATE_SUFFIX: &str = "[path][name].[ext]";

/// Expand a destination template for a file at `relative_path` (forward slashes)
pub fn expand_template(template: &str, relative_path: &str) -> String {
    let parts = split_request(relative_path);
    let path = if parts.dir.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.dir)
    };
    let ext = parts.ext.trim_start_matches('.');

    let template = if ext.is_empty() {
        template.replace(".[ext]", "[ext]")
    } else {
        template.to_string()
    };

    template
        .replace("[path]", &path)
        .replace("[name]", parts.name)
        .replace("[ext]", ext)
}
