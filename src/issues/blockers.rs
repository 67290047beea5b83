/// Summary markers that flag an issue as a blocker. Matched case-sensitively.
const BLOCKER_MARKERS: [&str; 2] = ["[BLOCK]", "[Block]"];

pub fn is_blocker(summary: &str) -> bool {
    BLOCKER_MARKERS.iter().any(|marker| summary.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_upper_case_marker() {
        assert!(is_blocker("[BLOCK] crash on boot"));
    }

    #[test]
    fn detects_title_case_marker_anywhere() {
        assert!(is_blocker("[Block] minor"));
        assert!(is_blocker("Login fails [Block]"));
    }

    #[test]
    fn ignores_unbracketed_or_other_casing() {
        assert!(!is_blocker("block on boot"));
        assert!(!is_blocker("[block] lower case"));
        assert!(!is_blocker("BLOCK without brackets"));
        assert!(!is_blocker(""));
    }
}
