//! Which packages a converted project needs, and how its scripts change

use crate::project::{PackageJson, Platform, MORPH_PACKAGE};
use crate::registry::PackageVersion;
use anyhow::Result;

/// Section of package.json a package is added to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

/// A package to add, before its version is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    pub name: &'static str,
    pub kind: DependencyKind,
}

impl DependencyRequest {
    const fn runtime(name: &'static str) -> Self {
        Self {
            name,
            kind: DependencyKind::Runtime,
        }
    }

    const fn dev(name: &'static str) -> Self {
        Self {
            name,
            kind: DependencyKind::Dev,
        }
    }
}

/// Every package added for one platform
#[derive(Debug, Clone)]
pub struct DependencyPlan {
    requests: Vec<DependencyRequest>,
}

impl DependencyPlan {
    pub fn for_platform(platform: Platform) -> Self {
        let mut requests = vec![
            DependencyRequest::dev(MORPH_PACKAGE),
            DependencyRequest::dev("@viewstools/e2e"),
            DependencyRequest::dev("concurrently"),
            DependencyRequest::runtime(platform.router_package()),
            DependencyRequest::runtime("prop-types"),
        ];

        if platform == Platform::Dom {
            requests.push(DependencyRequest::runtime("emotion"));
        }

        Self { requests }
    }

    /// Names to look up in the registry, in plan order
    pub fn package_names(&self) -> Vec<&'static str> {
        self.requests.iter().map(|r| r.name).collect()
    }

    /// Add every resolved package to package.json as a caret range
    pub fn apply(&self, pkg: &mut PackageJson, versions: &[PackageVersion]) -> Result<()> {
        for request in &self.requests {
            let resolved = versions
                .iter()
                .find(|v| v.name == request.name)
                .ok_or_else(|| anyhow::anyhow!("No version resolved for '{}'", request.name))?;

            match request.kind {
                DependencyKind::Runtime => pkg.add_dependency(request.name, &resolved.version)?,
                DependencyKind::Dev => pkg.add_dev_dependency(request.name, &resolved.version)?,
            }
        }
        Ok(())
    }
}

/// `concurrently` invocation running a dev script next to the Views watcher
fn alongside_views(script: &str) -> String {
    format!("concurrently \"npm run {}\" \"npm run views\"", script)
}

/// Rewire scripts so every entry point also runs the Views compiler
///
/// The previous `start` (and `ios`/`android` on native) move to `dev` (`dev:ios`,
/// `dev:android`); when the source was never defined the target is dropped.
pub fn apply_scripts(pkg: &mut PackageJson, platform: Platform) -> Result<()> {
    pkg.copy_script("start", "dev")?;
    pkg.set_script("start", alongside_views("dev"))?;
    pkg.set_script(
        "views",
        format!("views-morph src --watch --as {}", platform.morph_target()),
    )?;

    match platform {
        Platform::Dom => {
            pkg.set_script(
                "prebuild",
                format!("views-morph src --as {}", platform.morph_target()),
            )?;
        }
        Platform::Native => {
            for target in ["ios", "android"] {
                let dev = format!("dev:{}", target);
                pkg.copy_script(target, &dev)?;
                pkg.set_script(target, alongside_views(&dev))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolved(names: &[&str]) -> Vec<PackageVersion> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| PackageVersion {
                name: name.to_string(),
                version: semver::Version::new(1, i as u64, 0),
            })
            .collect()
    }

    #[test]
    fn test_dom_plan() {
        let plan = DependencyPlan::for_platform(Platform::Dom);
        assert_eq!(
            plan.package_names(),
            [
                "@viewstools/morph",
                "@viewstools/e2e",
                "concurrently",
                "react-router-dom",
                "prop-types",
                "emotion"
            ]
        );
    }

    #[test]
    fn test_native_plan_has_no_emotion() {
        let plan = DependencyPlan::for_platform(Platform::Native);
        let names = plan.package_names();
        assert!(names.contains(&"react-router-native"));
        assert!(!names.contains(&"emotion"));
        assert!(!names.contains(&"react-router-dom"));
    }

    #[test]
    fn test_apply_splits_sections() {
        let plan = DependencyPlan::for_platform(Platform::Dom);
        let mut pkg = PackageJson::from_value(json!({
            "dependencies": { "react-dom": "^16.2.0" }
        }))
        .unwrap();

        plan.apply(&mut pkg, &resolved(&plan.package_names())).unwrap();

        assert!(pkg.has_dev_dependency("@viewstools/morph"));
        assert!(pkg.has_dev_dependency("@viewstools/e2e"));
        assert!(pkg.has_dev_dependency("concurrently"));
        assert!(pkg.has_dependency("react-router-dom"));
        assert!(pkg.has_dependency("prop-types"));
        assert!(pkg.has_dependency("emotion"));
        assert_eq!(pkg.dependency_range("emotion"), Some("^1.5.0"));
    }

    #[test]
    fn test_apply_requires_every_version() {
        let plan = DependencyPlan::for_platform(Platform::Native);
        let mut pkg = PackageJson::from_value(json!({})).unwrap();
        let err = plan
            .apply(&mut pkg, &resolved(&["@viewstools/morph"]))
            .unwrap_err();
        assert!(err.to_string().contains("@viewstools/e2e"));
    }

    #[test]
    fn test_dom_scripts() {
        let mut pkg = PackageJson::from_value(json!({
            "scripts": {
                "start": "react-scripts start",
                "build": "react-scripts build"
            }
        }))
        .unwrap();

        apply_scripts(&mut pkg, Platform::Dom).unwrap();

        assert_eq!(pkg.script("dev"), Some("react-scripts start"));
        assert_eq!(
            pkg.script("start"),
            Some("concurrently \"npm run dev\" \"npm run views\"")
        );
        assert_eq!(
            pkg.script("views"),
            Some("views-morph src --watch --as react-dom")
        );
        assert_eq!(pkg.script("prebuild"), Some("views-morph src --as react-dom"));
        assert_eq!(pkg.script("build"), Some("react-scripts build"));
        assert_eq!(pkg.script("dev:ios"), None);
    }

    #[test]
    fn test_native_scripts() {
        let mut pkg = PackageJson::from_value(json!({
            "scripts": {
                "start": "react-native-scripts start",
                "ios": "react-native-scripts ios",
                "android": "react-native-scripts android"
            }
        }))
        .unwrap();

        apply_scripts(&mut pkg, Platform::Native).unwrap();

        assert_eq!(pkg.script("dev"), Some("react-native-scripts start"));
        assert_eq!(pkg.script("dev:ios"), Some("react-native-scripts ios"));
        assert_eq!(
            pkg.script("ios"),
            Some("concurrently \"npm run dev:ios\" \"npm run views\"")
        );
        assert_eq!(pkg.script("dev:android"), Some("react-native-scripts android"));
        assert_eq!(
            pkg.script("android"),
            Some("concurrently \"npm run dev:android\" \"npm run views\"")
        );
        assert_eq!(
            pkg.script("views"),
            Some("views-morph src --watch --as react-native")
        );
        assert_eq!(pkg.script("prebuild"), None);
    }

    #[test]
    fn test_scripts_without_start() {
        let mut pkg = PackageJson::from_value(json!({})).unwrap();
        apply_scripts(&mut pkg, Platform::Dom).unwrap();

        assert_eq!(pkg.script("dev"), None);
        assert!(pkg.script("start").is_some());
    }

    #[test]
    fn test_stale_dev_scripts_are_dropped() {
        let mut pkg = PackageJson::from_value(json!({
            "scripts": {
                "dev": "old-dev",
                "dev:android": "old-android",
                "ios": "react-native-scripts ios"
            }
        }))
        .unwrap();

        apply_scripts(&mut pkg, Platform::Native).unwrap();

        assert_eq!(pkg.script("dev"), None);
        assert_eq!(pkg.script("dev:android"), None);
        assert_eq!(pkg.script("dev:ios"), Some("react-native-scripts ios"));
        assert_eq!(
            pkg.script("start"),
            Some("concurrently \"npm run dev\" \"npm run views\"")
        );
    }
}
