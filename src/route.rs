#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Upload,
    Search,
    Chatbot,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Upload, Section::Search, Section::Chatbot];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Upload => "upload",
            Section::Search => "search",
            Section::Chatbot => "chatbot",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Upload => "File Upload",
            Section::Search => "File Search",
            Section::Chatbot => "Chatbot",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::Upload => "Upload your documents",
            Section::Search => "Search through files",
            Section::Chatbot => "AI Assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Auth,
    Dashboard,
    Profile,
}

/// The views reachable in the app, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Auth,
    Dashboard(Option<Section>),
    Profile,
}

impl Route {
    /// Unknown paths fall back to the landing page.
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["auth"] => Route::Auth,
            ["profile"] => Route::Profile,
            ["app"] => Route::Dashboard(None),
            ["app", section] => Route::Dashboard(
                Section::ALL.into_iter().find(|s| s.slug() == *section),
            ),
            _ => Route::Landing,
        }
    }

    /// Top-level page, ignoring the dashboard section.
    pub fn page(&self) -> Page {
        match self {
            Route::Landing => Page::Landing,
            Route::Auth => Page::Auth,
            Route::Dashboard(_) => Page::Dashboard,
            Route::Profile => Page::Profile,
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Route::Dashboard(section) => *section,
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::Dashboard(None) => "/app".to_string(),
            Route::Dashboard(Some(section)) => format!("/app/{}", section.slug()),
            Route::Profile => "/profile".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path("/auth"), Route::Auth);
        assert_eq!(Route::from_path("/app/"), Route::Dashboard(None));
        assert_eq!(Route::from_path("/app/search"), Route::Dashboard(Some(Section::Search)));
        assert_eq!(Route::from_path("/profile"), Route::Profile);
    }

    #[test]
    fn unknown_paths_fall_back() {
        assert_eq!(Route::from_path("/nope"), Route::Landing);
        assert_eq!(Route::from_path("/app/nope"), Route::Dashboard(None));
        assert_eq!(Route::from_path("/app/chatbot/extra"), Route::Landing);
    }

    #[test]
    fn sections_share_the_dashboard_page() {
        let upload = Route::Dashboard(Some(Section::Upload));
        assert_eq!(upload.page(), Route::Dashboard(None).page());
        assert_eq!(upload.section(), Some(Section::Upload));
        assert_eq!(Route::Profile.section(), None);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Landing,
            Route::Auth,
            Route::Dashboard(None),
            Route::Dashboard(Some(Section::Upload)),
            Route::Profile,
        ] {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }
}
