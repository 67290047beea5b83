use std::fmt::Display;

use console::{style, StyledObject};

/// Section titles in the summary and progress output.
pub fn heading(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright().underlined()
}

pub fn icon(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright()
}

/// Field names and secondary notes.
pub fn muted(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn source(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).cyan()
}

/// Issue counts and in-flight status messages.
pub fn figure(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright().yellow()
}

pub fn done(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright().green()
}

/// Blocker count: red as soon as there is one.
pub fn blockers(count: usize) -> StyledObject<String> {
    if count > 0 {
        style(count.to_string()).bright().red()
    } else {
        figure(count)
    }
}

pub fn brand(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).blue().bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_keep_plain_text() {
        console::set_colors_enabled(false);
        assert_eq!(blockers(0).to_string(), "0");
        assert_eq!(blockers(3).to_string(), "3");
        assert_eq!(source("issues.json").to_string(), "issues.json");
    }
}
