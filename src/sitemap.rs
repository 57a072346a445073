//! The route table: every page the site serves, with its title, the layout
//! that wraps it and whether it needs a session.
//!
//! Layouts are resolved here once, at the routing layer, instead of each page
//! declaring its own wrapper.

use crate::models::Access;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Header, footer and newsletter signup.
    Marketing,
    /// Member navigation (rewards, surveys, spinner).
    Dashboard,
    Onboarding,
    /// Post-survey landing pages reached from survey redirects.
    Standalone,
    Bare,
}

#[derive(Debug, Clone, Copy)]
pub struct PageEntry {
    /// Segments in braces match any single segment, a trailing `*` matches the rest.
    pub pattern: &'static str,
    pub title: &'static str,
    pub layout: Layout,
    pub access: Access,
}

const fn page(pattern: &'static str, title: &'static str, layout: Layout, access: Access) -> PageEntry {
    PageEntry {
        pattern,
        title,
        layout,
        access,
    }
}

pub const PAGES: &[PageEntry] = &[
    page("/", "Hubsite Social", Layout::Marketing, Access::Public),
    page("/about", "About us", Layout::Marketing, Access::Public),
    page("/features", "Features", Layout::Marketing, Access::Public),
    page("/faq", "Frequently asked questions", Layout::Marketing, Access::Public),
    page("/works", "How it works", Layout::Marketing, Access::Public),
    page("/termsofuse", "Terms of use", Layout::Marketing, Access::Public),
    page("/privacypolicy", "Privacy policy", Layout::Marketing, Access::Public),
    page("/rewardpolicy", "Reward policy", Layout::Marketing, Access::Public),
    page("/subscription", "Newsletter subscription", Layout::Bare, Access::Public),
    page("/onboarding", "Welcome", Layout::Onboarding, Access::Member),
    page("/dashboard", "Rewards", Layout::Dashboard, Access::Member),
    page("/dashboard/spinner", "Spinner", Layout::Dashboard, Access::Member),
    page("/dashboard/*", "Dashboard", Layout::Dashboard, Access::Member),
    page("/surveys", "Surveys", Layout::Dashboard, Access::Member),
    page("/standalone", "Thank you", Layout::Standalone, Access::Public),
    page("/standalone/screened-out", "Screened out", Layout::Standalone, Access::Public),
    page("/standalone/quality-issue", "Quality issue", Layout::Standalone, Access::Public),
    page("/standalone/target-reached", "Target reached", Layout::Standalone, Access::Public),
    page("/standalone/{survey_id}/{user_id}", "Survey complete", Layout::Standalone, Access::Public),
    page("/admin", "Admin", Layout::Bare, Access::Public),
    page("/admin/*", "Admin", Layout::Bare, Access::Public),
];

/// First entry whose pattern matches `path`. Exact entries are listed before
/// patterns so they win.
pub fn lookup(path: &str) -> Option<&'static PageEntry> {
    PAGES.iter().find(|entry| matches(entry.pattern, path))
}

/// Unknown routes are public; the 404 page needs no session.
pub fn access_for(path: &str) -> Access {
    lookup(path).map(|e| e.access).unwrap_or(Access::Public)
}

pub fn layout_for(path: &str) -> Layout {
    lookup(path).map(|e| e.layout).unwrap_or(Layout::Bare)
}

fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(_)) => return true,
            (Some(p), Some(_)) if p.starts_with('{') && p.ends_with('}') => {}
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_routes_resolve_their_layout() {
        assert_eq!(layout_for("/"), Layout::Marketing);
        assert_eq!(layout_for("/dashboard"), Layout::Dashboard);
        assert_eq!(layout_for("/onboarding"), Layout::Onboarding);
        assert_eq!(lookup("/standalone/screened-out").map(|e| e.title), Some("Screened out"));
    }

    #[test]
    fn parameter_segments_match_one_segment() {
        let entry = lookup("/standalone/s1/u1").expect("should match");
        assert_eq!(entry.title, "Survey complete");
        assert!(lookup("/standalone/s1/u1/extra").is_none());
    }

    #[test]
    fn wildcard_needs_at_least_one_segment() {
        assert_eq!(lookup("/dashboard/rewards").map(|e| e.title), Some("Dashboard"));
        assert_eq!(lookup("/admin/users/7").map(|e| e.title), Some("Admin"));
        assert_eq!(lookup("/dashboard").map(|e| e.title), Some("Rewards"));
    }

    #[test]
    fn member_routes_need_a_session() {
        assert_eq!(access_for("/dashboard/spinner"), Access::Member);
        assert_eq!(access_for("/surveys"), Access::Member);
        assert_eq!(access_for("/faq"), Access::Public);
        assert_eq!(access_for("/no-such-page"), Access::Public);
    }
}
