use super::types::RawIssueLink;

/// Direction of a cross-issue link as seen from the issue that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    /// This issue points at the target ("blocks", "relates to").
    Outward(LinkDescriptor),
    /// The target points at this issue ("is blocked by").
    Inward(LinkDescriptor),
    /// Neither side is populated.
    Empty,
}

/// Structured view of a link, built once per reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDescriptor {
    pub target_key: String,
    pub title: Option<String>,
    pub display_text: String,
}

impl LinkDescriptor {
    fn new(target_key: &str, title: Option<&str>) -> Self {
        Self {
            target_key: target_key.to_string(),
            title: title.map(ToString::to_string),
            display_text: target_key.to_string(),
        }
    }

    /// Explicit title if present and non-blank, otherwise the display text.
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.display_text.trim())
    }
}

impl From<&RawIssueLink> for LinkRef {
    fn from(link: &RawIssueLink) -> Self {
        let title = link.title.as_deref();
        if let Some(target) = &link.outward_issue {
            LinkRef::Outward(LinkDescriptor::new(&target.key, title))
        } else if let Some(target) = &link.inward_issue {
            LinkRef::Inward(LinkDescriptor::new(&target.key, title))
        } else {
            LinkRef::Empty
        }
    }
}

impl LinkRef {
    pub fn title(&self) -> &str {
        match self {
            LinkRef::Outward(descriptor) | LinkRef::Inward(descriptor) => descriptor.title(),
            LinkRef::Empty => "",
        }
    }
}

/// Resolves every link of an issue to its display title, in input order,
/// joined with `", "`.
///
/// Empty references still contribute an (empty) entry so the position of
/// each link is preserved.
pub fn resolve_link_titles(links: &[RawIssueLink]) -> String {
    links
        .iter()
        .map(|link| LinkRef::from(link).title().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::types::LinkedIssue;

    fn outward(key: &str) -> RawIssueLink {
        RawIssueLink {
            outward_issue: Some(LinkedIssue {
                key: key.to_string(),
            }),
            ..RawIssueLink::default()
        }
    }

    fn inward(key: &str) -> RawIssueLink {
        RawIssueLink {
            inward_issue: Some(LinkedIssue {
                key: key.to_string(),
            }),
            ..RawIssueLink::default()
        }
    }

    #[test]
    fn outward_link_resolves_to_target_key() {
        let link = LinkRef::from(&outward("PRJ-2"));
        assert!(matches!(link, LinkRef::Outward(_)));
        assert_eq!(link.title(), "PRJ-2");
    }

    #[test]
    fn inward_link_resolves_to_target_key() {
        let link = LinkRef::from(&inward("PRJ-3"));
        assert!(matches!(link, LinkRef::Inward(_)));
        assert_eq!(link.title(), "PRJ-3");
    }

    #[test]
    fn outward_wins_when_both_sides_are_present() {
        let mut raw = outward("OUT-1");
        raw.inward_issue = Some(LinkedIssue {
            key: "IN-1".to_string(),
        });
        assert_eq!(LinkRef::from(&raw).title(), "OUT-1");
    }

    #[test]
    fn link_without_target_resolves_to_empty_title() {
        let link = LinkRef::from(&RawIssueLink::default());
        assert_eq!(link, LinkRef::Empty);
        assert_eq!(link.title(), "");
    }

    #[test]
    fn explicit_title_is_preferred_over_display_text() {
        let mut raw = outward("PRJ-9");
        raw.title = Some("Upstream crash".to_string());
        assert_eq!(LinkRef::from(&raw).title(), "Upstream crash");

        raw.title = Some("   ".to_string());
        assert_eq!(LinkRef::from(&raw).title(), "PRJ-9");
    }

    #[test]
    fn joins_titles_in_input_order() {
        let links = vec![outward("A-1"), inward("B-2"), outward("C-3")];
        assert_eq!(resolve_link_titles(&links), "A-1, B-2, C-3");
        assert_eq!(resolve_link_titles(&[]), "");
    }
}
