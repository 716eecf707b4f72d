//! Help, deprecation and update messages

use crate::install::PackageManager;
use crate::product::ProductConfig;
use crate::project::Platform;
use colored::Colorize;
use std::path::Path;

/// Horizontal padding inside a box, in columns
const BOX_PADDING_X: usize = 3;

/// Draw a rounded box around `lines`, one blank line of padding above and below
pub fn boxed(lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|l| console::measure_text_width(l))
        .max()
        .unwrap_or(0);
    let inner = width + BOX_PADDING_X * 2;
    let pad = " ".repeat(BOX_PADDING_X);

    let blank = format!("│{}│", " ".repeat(inner));
    let mut out = vec![format!("╭{}╮", "─".repeat(inner)), blank.clone()];
    for line in lines {
        let fill = " ".repeat(width - console::measure_text_width(line));
        out.push(format!("│{}{}{}{}│", pad, line, fill, pad));
    }
    out.push(blank);
    out.push(format!("╰{}╯", "─".repeat(inner)));
    out.join("\n")
}

/// Shown when the CLI runs under the name of its deprecated predecessor
pub fn deprecation<C: ProductConfig>(config: &C) -> String {
    boxed(&[
        format!(
            "{} is deprecated, use {} instead. Run this to update:",
            config.legacy_name(),
            config.package_name()
        )
        .red()
        .to_string(),
        config.upgrade_command().green().to_string(),
        config.legacy_uninstall_command().green().to_string(),
    ])
}

/// Boxed update notice built from [`crate::version::check_for_update`]
pub fn update_available(notice: &str) -> String {
    let lines: Vec<String> = notice
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.yellow().to_string()
            } else {
                line.to_string()
            }
        })
        .collect();
    boxed(&lines)
}

pub fn get_in_touch<C: ProductConfig>(config: &C) -> String {
    let mut links = config.community_links().iter();
    let mut out = String::from("\n");

    if let Some((_, url)) = links.next() {
        out.push_str(&format!("If you need any help, get in touch at {}", url.blue()));
    }
    for (label, url) in links {
        out.push_str(&format!(" or\njoin our {} community at {}", label, url.blue()));
    }
    out.push('\n');
    out
}

/// How to run the converted project, where the docs are, and who to ask
pub fn help<C: ProductConfig>(
    config: &C,
    platform: Platform,
    package_manager: PackageManager,
) -> String {
    let mut out = String::new();

    match platform {
        Platform::Dom => {
            out.push_str(&format!(
                "Run it with {}\n\n",
                package_manager.start_command().green()
            ));
        }
        Platform::Native => {
            out.push_str(&format!(
                "Run the iOS simulator with {} and the Android one with {}\n",
                "npm run ios".green(),
                "npm run android".green()
            ));
            out.push_str(&format!(
                "\nSometimes the simulator fails to load. You will want to stop the command by pressing\n\
                 {} and running {} instead.\n\
                 If the simulator is already open, press the button to try again.\n\
                 \n\
                 You can also use a real device for testing, \
                 https://github.com/react-community/create-react-native-app#npm-run-ios\n\
                 for more info.\n",
                "ctrl+c".yellow(),
                "npm start".yellow()
            ));
        }
    }

    out.push_str(&format!(
        "You can find the docs at {}\n",
        config.docs_url().blue()
    ));
    out.push_str(&get_in_touch(config));
    out.push_str("Happy coding! :)");
    out
}

/// Shown when the directory is not a create-react-app or Expo project
pub fn unsupported<C: ProductConfig>(config: &C, dir: &Path) -> String {
    let name = config.name();
    let mut out = String::new();

    out.push_str(
        "It looks like the directory you're on isn't either a create-react-app or create-react-native-app project.\n",
    );
    out.push_str(&format!(
        "Is {} the right folder?\n\n",
        dir.display().to_string().yellow()
    ));
    out.push_str(
        "If you don't have a project and want to make a new one, follow these instructions:\n",
    );
    out.push_str(&format!("For {}, ie, a web project:\n", "React DOM".blue()));
    out.push_str(&format!(
        "{}\n",
        format!(
            "npm install --global create-react-app\ncreate-react-app my-app\ncd my-app\n{}",
            name
        )
        .green()
    ));
    out.push_str(&format!(
        "\nFor {}, ie, an iOS or Android project:\n",
        "React Native".blue()
    ));
    out.push_str(&format!(
        "{}\n",
        format!(
            "npm install --global create-react-native-app\ncreate-react-native-app my-native-app\ncd my-native-app\n{}",
            name
        )
        .green()
    ));
    out.push_str(&get_in_touch(config));
    out
}

pub fn already_views() -> String {
    format!("{}\n", "This is already a Views project! 🔥 🎉 ".blue())
}

/// Printed once the conversion is done, before [`help`]
pub fn success<C: ProductConfig>(config: &C) -> String {
    format!(
        "{}\n\
         Go ahead and open the file {} in your editor and change something ✏️\n\
         If this is your first time using Views, here's how to get your editor to understand Views files {}",
        "This is now a Views project 🎉!!!".blue(),
        crate::bootstrap::APP_VIEW.path.green(),
        config.syntax_docs_url().blue()
    )
}
