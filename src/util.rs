use std::path::{Component, Path};

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

/// True when `path` is non-empty, relative, and never climbs out of its root.
pub fn is_contained_relative(path: &Path) -> bool {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return false;
    }
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Lowercase an application name that contains uppercase characters so it is
/// usable as a container image and service name.
///
/// Returns `None` when the name needs no change.
pub fn normalize_app_name(name: &str) -> Option<String> {
    if name.is_empty() || !name.chars().any(char::is_uppercase) {
        return None;
    }
    Some(name.to_lowercase().replace(['/', '\\'], "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contained_relative_rejects_escapes() {
        assert!(is_contained_relative(Path::new("Dockerfile")));
        assert!(is_contained_relative(Path::new("charts/app/values.yaml")));
        assert!(is_contained_relative(Path::new("./index.js")));
        assert!(!is_contained_relative(Path::new("")));
        assert!(!is_contained_relative(Path::new("/etc/passwd")));
        assert!(!is_contained_relative(Path::new("../outside")));
        assert!(!is_contained_relative(Path::new("charts/../../outside")));
    }

    #[test]
    fn normalize_app_name_only_touches_uppercase_names() {
        assert_eq!(normalize_app_name("my-app"), None);
        assert_eq!(normalize_app_name(""), None);
        assert_eq!(normalize_app_name("MyApp"), Some("myapp".to_string()));
        assert_eq!(
            normalize_app_name("Team/MyApp"),
            Some("team-myapp".to_string())
        );
        assert_eq!(
            normalize_app_name("Team\\MyApp"),
            Some("team-myapp".to_string())
        );
    }

    #[test]
    fn display_path_strips_base_when_possible() {
        let base = Path::new("/srv/app");
        assert_eq!(display_path(Path::new("/srv/app/Dockerfile"), Some(base)), "Dockerfile");
        assert_eq!(display_path(Path::new("/other/Dockerfile"), Some(base)), "/other/Dockerfile");
        assert_eq!(display_path(Path::new("/other/Dockerfile"), None), "/other/Dockerfile");
    }
}
