use std::path::{Component, Path, PathBuf};

/// Resolves a decoded request path against the data directory.
///
/// The path is built component by component; parent-directory segments and
/// absolute components yield `None`, so a request can never name anything
/// outside the root. Leading slashes are treated as root-relative, and an
/// empty path resolves to the root itself.
pub fn resolve_under(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_root() {
        let root = Path::new("/data/snapshot");
        assert_eq!(
            resolve_under(root, "/reports/q1.csv"),
            Some(PathBuf::from("/data/snapshot/reports/q1.csv"))
        );
    }

    #[test]
    fn empty_path_is_the_root() {
        let root = Path::new("/data/snapshot");
        assert_eq!(resolve_under(root, "/"), Some(root.to_path_buf()));
        assert_eq!(resolve_under(root, ""), Some(root.to_path_buf()));
    }

    #[test]
    fn current_dir_segments_are_skipped() {
        let root = Path::new("/data/snapshot");
        assert_eq!(
            resolve_under(root, "/./a/./b.csv"),
            Some(PathBuf::from("/data/snapshot/a/b.csv"))
        );
    }

    #[test]
    fn parent_dir_segments_are_rejected() {
        let root = Path::new("/data/snapshot");
        assert_eq!(resolve_under(root, "/../etc/passwd"), None);
        assert_eq!(resolve_under(root, "/a/../../b"), None);
        assert_eq!(resolve_under(root, ".."), None);
    }

    #[test]
    fn extra_leading_slashes_do_not_escape() {
        let root = Path::new("/data/snapshot");
        assert_eq!(
            resolve_under(root, "//etc/passwd"),
            Some(PathBuf::from("/data/snapshot/etc/passwd"))
        );
    }
}
