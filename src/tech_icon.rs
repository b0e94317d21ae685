// Icon lookup for technology badges: an ordered keyword table, first match
// wins, `Rocket` when nothing matches.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TechIcon {
    Code,
    Terminal,
    Palette,
    Database,
    Globe,
    GitBranch,
    Shield,
    Users,
    Cloud,
    Brain,
    Zap,
    Layers,
    Smartphone,
    Rocket,
}

impl TechIcon {
    /// Kebab-case icon name understood by the page's icon set.
    pub fn name(&self) -> &'static str {
        match self {
            TechIcon::Code => "code-2",
            TechIcon::Terminal => "terminal",
            TechIcon::Palette => "palette",
            TechIcon::Database => "database",
            TechIcon::Globe => "globe",
            TechIcon::GitBranch => "git-branch",
            TechIcon::Shield => "shield",
            TechIcon::Users => "users",
            TechIcon::Cloud => "cloud",
            TechIcon::Brain => "brain",
            TechIcon::Zap => "zap",
            TechIcon::Layers => "layers",
            TechIcon::Smartphone => "smartphone",
            TechIcon::Rocket => "rocket",
        }
    }
}

// Order matters: "ai" is a loose substring ("tailwind", "email") so the
// Brain rule sits below the specific ones.
const RULES: &[(&[&str], TechIcon)] = &[
    (&["react", "next"], TechIcon::Code),
    (&["typescript", "javascript"], TechIcon::Terminal),
    (&["tailwind", "css"], TechIcon::Palette),
    (&["firebase", "database"], TechIcon::Database),
    (&["api", "rest", "graphql"], TechIcon::Globe),
    (&["git"], TechIcon::GitBranch),
    (&["ci/cd", "testing"], TechIcon::Shield),
    (&["agile", "scrum"], TechIcon::Users),
    (&["serverless", "cloud"], TechIcon::Cloud),
    (&["openai", "claude", "ai"], TechIcon::Brain),
    (&["prompt"], TechIcon::Zap),
    (&["llm", "integration"], TechIcon::Layers),
    (&["mobile", "responsive"], TechIcon::Smartphone),
];

pub fn icon_for(tech: &str) -> TechIcon {
    let tech = tech.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| tech.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(TechIcon::Rocket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keywords_case_insensitively() {
        assert_eq!(icon_for("React"), TechIcon::Code);
        assert_eq!(icon_for("Next.js"), TechIcon::Code);
        assert_eq!(icon_for("TypeScript"), TechIcon::Terminal);
        assert_eq!(icon_for("Tailwind CSS"), TechIcon::Palette);
        assert_eq!(icon_for("GraphQL"), TechIcon::Globe);
        assert_eq!(icon_for("GitHub Actions"), TechIcon::GitBranch);
        assert_eq!(icon_for("CI/CD"), TechIcon::Shield);
        assert_eq!(icon_for("Scrum"), TechIcon::Users);
        assert_eq!(icon_for("Claude"), TechIcon::Brain);
        assert_eq!(icon_for("Prompt Engineering"), TechIcon::Zap);
        assert_eq!(icon_for("LLM"), TechIcon::Layers);
        assert_eq!(icon_for("Responsive Design"), TechIcon::Smartphone);
    }

    #[test]
    fn first_rule_wins() {
        // matches both the Database and Cloud rules
        assert_eq!(icon_for("Firebase Cloud Functions"), TechIcon::Database);
        // matches both the Terminal and Brain rules
        assert_eq!(icon_for("JavaScript AI SDK"), TechIcon::Terminal);
    }

    #[test]
    fn falls_back_to_rocket() {
        assert_eq!(icon_for("Figma"), TechIcon::Rocket);
        assert_eq!(icon_for(""), TechIcon::Rocket);
        assert_eq!(TechIcon::Rocket.name(), "rocket");
    }
}
