//! Project detection: which kind of React project lives in a directory

pub mod package_json;

pub use package_json::PackageJson;

use std::fmt;

/// Dependency whose presence in devDependencies marks a finished conversion
pub const MORPH_PACKAGE: &str = "@viewstools/morph";

/// React flavour of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// create-react-app (react-dom)
    Dom,
    /// Expo / create-react-native-app (react-native)
    Native,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Dom => "web",
            Platform::Native => "native",
        }
    }

    /// Value passed to `views-morph --as`
    pub fn morph_target(&self) -> &'static str {
        match self {
            Platform::Dom => "react-dom",
            Platform::Native => "react-native",
        }
    }

    /// Router package matching the platform
    pub fn router_package(&self) -> &'static str {
        match self {
            Platform::Dom => "react-router-dom",
            Platform::Native => "react-router-native",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of inspecting a project's package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Morph is already a dev dependency; the platform is a hint for the help text
    AlreadyViews(Platform),
    /// Neither react-dom nor react-native is a dependency
    Unsupported,
    /// Ready to convert
    Convert(Platform),
}

/// Platform of a package.json, react-dom taking precedence over react-native
pub fn platform_of(pkg: &PackageJson) -> Option<Platform> {
    if pkg.has_dependency("react-dom") {
        Some(Platform::Dom)
    } else if pkg.has_dependency("react-native") {
        Some(Platform::Native)
    } else {
        None
    }
}

/// Classify a project
pub fn detect(pkg: &PackageJson) -> Detection {
    let platform = platform_of(pkg);

    if pkg.has_dev_dependency(MORPH_PACKAGE) {
        return Detection::AlreadyViews(platform.unwrap_or(Platform::Native));
    }

    match platform {
        Some(platform) => Detection::Convert(platform),
        None => Detection::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pkg(value: serde_json::Value) -> PackageJson {
        PackageJson::from_value(value).unwrap()
    }

    #[test]
    fn test_detect_dom_project() {
        let p = pkg(json!({
            "dependencies": { "react": "^16.0.0", "react-dom": "^16.0.0" }
        }));
        assert_eq!(detect(&p), Detection::Convert(Platform::Dom));
    }

    #[test]
    fn test_detect_native_project() {
        let p = pkg(json!({
            "dependencies": { "expo": "^25.0.0", "react-native": "0.52.0" }
        }));
        assert_eq!(detect(&p), Detection::Convert(Platform::Native));
    }

    #[test]
    fn test_dom_wins_when_both_present() {
        let p = pkg(json!({
            "dependencies": { "react-dom": "^16.0.0", "react-native": "0.52.0" }
        }));
        assert_eq!(detect(&p), Detection::Convert(Platform::Dom));
    }

    #[test]
    fn test_detect_unsupported() {
        let p = pkg(json!({ "dependencies": { "lodash": "^4.0.0" } }));
        assert_eq!(detect(&p), Detection::Unsupported);

        let p = pkg(json!({ "name": "no-deps" }));
        assert_eq!(detect(&p), Detection::Unsupported);
    }

    #[test]
    fn test_already_views_checked_before_platform() {
        let p = pkg(json!({
            "dependencies": { "react-dom": "^16.0.0" },
            "devDependencies": { "@viewstools/morph": "^10.0.0" }
        }));
        assert_eq!(detect(&p), Detection::AlreadyViews(Platform::Dom));

        // No react dependency at all still reports an existing Views project
        let p = pkg(json!({
            "devDependencies": { "@viewstools/morph": "^10.0.0" }
        }));
        assert_eq!(detect(&p), Detection::AlreadyViews(Platform::Native));
    }

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::Dom.to_string(), "web");
        assert_eq!(Platform::Native.morph_target(), "react-native");
        assert_eq!(Platform::Dom.router_package(), "react-router-dom");
        assert_eq!(Platform::Native.router_package(), "react-router-native");
    }
}
