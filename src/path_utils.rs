//! Path string utilities
//!
//! Asset requests and copy destinations are handled as forward-slash strings,
//! independent of the host platform's separator.

use std::path::Path;

/// Convert a path to a string with forward slashes
///
/// ```
/// use std::path::Path;
/// use vendorize::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("fonts\\icons.woff")), "fonts/icons.woff");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize an asset request as written in source code
///
/// Backslashes become forward slashes, a trailing `?query` or `#fragment` is
/// dropped, and `.` segments (including a leading `./`) are removed.
///
/// ```
/// use vendorize::path_utils::normalize_request;
///
/// assert_eq!(normalize_request("./fonts/./a.woff?#iefix"), "fonts/a.woff");
/// ```
pub fn normalize_request(request: &str) -> String {
    let request = request.replace('\\', "/");
    let path = strip_query(&request);

    let absolute = path.starts_with('/');
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Drop a trailing `?query` or `#fragment` from a request
///
/// ```
/// use vendorize::path_utils::strip_query;
///
/// assert_eq!(strip_query("./font.eot?#iefix"), "./font.eot");
/// ```
pub fn strip_query(request: &str) -> &str {
    let end = request.find(['?', '#']).unwrap_or(request.len());
    &request[..end]
}

/// Resolve `..` segments against the segment before them
///
/// Backslashes become forward slashes, and `.` and empty segments are
/// dropped. A leading `/` or `./` is kept, as is a leading run of `../` on a
/// relative request. Returns `None` when a `..` would climb above the first
/// remaining segment.
///
/// ```
/// use vendorize::path_utils::collapse_parent_segments;
///
/// assert_eq!(
///     collapse_parent_segments("left-pad/../lodash/lodash.js").as_deref(),
///     Some("lodash/lodash.js")
/// );
/// assert_eq!(collapse_parent_segments("left-pad/../../x.js"), None);
/// ```
pub fn collapse_parent_segments(request: &str) -> Option<String> {
    let request = request.replace('\\', "/");

    let (prefix, rest) = if let Some(rest) = request.strip_prefix('/') {
        ("/".to_string(), rest)
    } else if let Some(rest) = request.strip_prefix("./") {
        ("./".to_string(), rest)
    } else {
        let climbs = request
            .split('/')
            .take_while(|segment| *segment == "..")
            .count();
        let rest = request
            .splitn(climbs + 1, '/')
            .nth(climbs)
            .unwrap_or_default();
        ("../".repeat(climbs), rest)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    Some(format!("{prefix}{}", segments.join("/")))
}

/// The components of a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts<'a> {
    /// Everything before the last `/`; empty for a bare file name
    pub dir: &'a str,
    /// File name without its extension
    pub name: &'a str,
    /// Extension including the leading dot; empty if there is none
    pub ext: &'a str,
}

/// Split a normalized request into directory, base name, and extension
///
/// A leading dot does not start an extension, so `.babelrc` has no extension.
///
/// ```
/// use vendorize::path_utils::split_request;
///
/// let parts = split_request("left-pad/lib/index.min.js");
/// assert_eq!(parts.dir, "left-pad/lib");
/// assert_eq!(parts.name, "index.min");
/// assert_eq!(parts.ext, ".js");
/// ```
pub fn split_request(request: &str) -> RequestParts<'_> {
    let (dir, file) = match request.rfind('/') {
        Some(i) => (&request[..i], &request[i + 1..]),
        None => ("", request),
    };

    let (name, ext) = match file.rfind('.') {
        Some(i) if i > 0 => (&file[..i], &file[i..]),
        _ => (file, ""),
    };

    RequestParts { dir, name, ext }
}

/// Join path segments with `/`, skipping empty ones
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_request_plain() {
        assert_eq!(normalize_request("left-pad/index.js"), "left-pad/index.js");
    }

    #[test]
    fn test_normalize_request_windows_separators() {
        assert_eq!(
            normalize_request("left-pad\\fonts\\a.woff"),
            "left-pad/fonts/a.woff"
        );
    }

    #[test]
    fn test_normalize_request_strips_query_and_fragment() {
        assert_eq!(normalize_request("pkg/font.eot?#iefix"), "pkg/font.eot");
        assert_eq!(normalize_request("pkg/icons.svg#star"), "pkg/icons.svg");
        assert_eq!(normalize_request("pkg/a.png?v=2"), "pkg/a.png");
    }

    #[test]
    fn test_normalize_request_keeps_absolute_root() {
        assert_eq!(normalize_request("/srv//app/./a.css"), "/srv/app/a.css");
    }

    #[test]
    fn test_split_request_without_directory() {
        let parts = split_request("index.js");
        assert_eq!(parts.dir, "");
        assert_eq!(parts.name, "index");
        assert_eq!(parts.ext, ".js");
    }

    #[test]
    fn test_split_request_without_extension() {
        let parts = split_request("pkg/LICENSE");
        assert_eq!(parts.dir, "pkg");
        assert_eq!(parts.name, "LICENSE");
        assert_eq!(parts.ext, "");
    }

    #[test]
    fn test_split_request_dotfile() {
        let parts = split_request("pkg/.babelrc");
        assert_eq!(parts.name, ".babelrc");
        assert_eq!(parts.ext, "");
    }

    #[test]
    fn test_join_segments_skips_empty() {
        assert_eq!(join_segments(["vendor", "", "index.js"]), "vendor/index.js");
    }

    #[test]
    fn test_collapse_parent_segments_into_sibling_package() {
        assert_eq!(
            collapse_parent_segments("left-pad/../lodash/lodash.js").as_deref(),
            Some("lodash/lodash.js")
        );
    }

    #[test]
    fn test_collapse_parent_segments_keeps_prefixes() {
        assert_eq!(
            collapse_parent_segments("/store/a/../b/c.js").as_deref(),
            Some("/store/b/c.js")
        );
        assert_eq!(
            collapse_parent_segments("./node_modules/a/./../b/x.png").as_deref(),
            Some("./node_modules/b/x.png")
        );
        assert_eq!(
            collapse_parent_segments("../../shared/x/../y.css").as_deref(),
            Some("../../shared/y.css")
        );
    }

    #[test]
    fn test_collapse_parent_segments_rejects_climbing_out() {
        assert_eq!(collapse_parent_segments("left-pad/../../x.js"), None);
        assert_eq!(collapse_parent_segments("./a/../../b.js"), None);
        assert_eq!(collapse_parent_segments("/.."), None);
    }
}
