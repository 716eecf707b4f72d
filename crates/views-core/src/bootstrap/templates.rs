//! Files written into a converted project, embedded at build time

use crate::project::Platform;

/// A file written verbatim, relative to the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: &'static str,
    pub contents: &'static str,
}

/// Sample View, shared by both platforms
pub const APP_VIEW: TemplateFile = TemplateFile {
    path: "src/Main/App.view",
    contents: include_str!("../../templates/common/App.view"),
};

/// Block appended to .gitignore so compiled views stay out of version control
pub const GITIGNORE_BLOCK: &str = include_str!("../../templates/common/gitignore");

const DOM_FILES: &[TemplateFile] = &[
    // flexbox-first base styles
    TemplateFile {
        path: "src/index.css",
        contents: include_str!("../../templates/dom/index.css"),
    },
    TemplateFile {
        path: "src/Main/App.view.logic.js",
        contents: include_str!("../../templates/dom/App.view.logic.js"),
    },
];

const NATIVE_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "App.js",
        contents: include_str!("../../templates/native/App.js"),
    },
    TemplateFile {
        path: "src/Main/App.view.logic.js",
        contents: include_str!("../../templates/native/App.view.logic.js"),
    },
    TemplateFile {
        path: "src/fonts.js",
        contents: include_str!("../../templates/native/fonts.js"),
    },
];

/// create-react-app boilerplate replaced by the sample View
pub const DOM_BOILERPLATE: &[&str] = &["src/App.css", "src/App.js", "src/App.test.js", "src/logo.svg"];

/// Platform-specific files, written before the sample View
pub fn platform_files(platform: Platform) -> &'static [TemplateFile] {
    match platform {
        Platform::Dom => DOM_FILES,
        Platform::Native => NATIVE_FILES,
    }
}
