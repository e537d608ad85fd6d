//! Markdown for the fixed pages of the site.

const ABOUT: &str = include_str!("../../assets/pages/about.md");
const PROJECT_ONE: &str = include_str!("../../assets/pages/project-1.md");
const PROJECT_TWO: &str = include_str!("../../assets/pages/project-2.md");
const NOTEPAD: &str = include_str!("../../assets/pages/notepad.md");
const SETTINGS: &str = include_str!("../../assets/pages/settings.md");

pub(super) fn page_for(title: &str) -> &'static str {
    match title {
        "About Me" => ABOUT,
        "Project 1" => PROJECT_ONE,
        "Project 2" => PROJECT_TWO,
        "Notepad" => NOTEPAD,
        "Settings" => SETTINGS,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixed_page_has_a_heading() {
        for title in ["About Me", "Project 1", "Project 2", "Notepad", "Settings"] {
            assert!(page_for(title).starts_with("## "), "{title} has no heading");
        }
    }
}
