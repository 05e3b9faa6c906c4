//! ---
//! so_section: "01-core-functionality"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Build metadata reported by `--version`."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use crate::config::SimulationConfig;

const UNKNOWN: &str = "unknown";
const SHORT_SHA_LEN: usize = 7;

/// Identity of a simulator binary plus the build metadata emitted by `vergen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub package: &'static str,
    pub semver: &'static str,
    pub git_sha: &'static str,
    pub build_timestamp: &'static str,
}

impl VersionInfo {
    /// Pass the caller's `CARGO_PKG_NAME` and `CARGO_PKG_VERSION`.
    #[must_use]
    pub fn for_package(package: &'static str, semver: &'static str) -> Self {
        Self {
            package,
            semver,
            git_sha: option_env!("VERGEN_GIT_SHA").unwrap_or(UNKNOWN),
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or(UNKNOWN),
        }
    }

    /// `smart-office-simgen 0.1.0 (git 1a2b3c4)`
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "{} {} (git {})",
            self.package,
            self.semver,
            short_sha(self.git_sha)
        )
    }

    /// Banner, build time and the generation window used when nothing is configured.
    #[must_use]
    pub fn extended(&self, defaults: &SimulationConfig) -> String {
        format!(
            "{}\nBuilt: {}\nDefaults: {}",
            self.banner(),
            self.build_timestamp,
            describe_defaults(defaults)
        )
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}

fn describe_defaults(config: &SimulationConfig) -> String {
    let seconds = config.duration.as_secs();
    let span = if seconds % 86_400 == 0 {
        format!("{} days", seconds / 86_400)
    } else {
        format!("{} min", seconds / 60)
    };
    format!(
        "{} every {} min, {} room(s), seed {}",
        span,
        config.interval.as_secs() / 60,
        config.rooms,
        config.seed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn banner_names_the_calling_package() {
        let info = VersionInfo::for_package("smart-office-simgen", "1.2.3");
        assert!(info.banner().starts_with("smart-office-simgen 1.2.3 (git "));
    }

    #[test]
    fn extended_reports_generation_defaults() {
        let info = VersionInfo::for_package("smart-office-simgen", "1.2.3");
        let extended = info.extended(&SimulationConfig::default());
        assert!(extended.contains("Built: "));
        assert!(extended.ends_with("Defaults: 7 days every 15 min, 1 room(s), seed 2025"));
    }

    #[test]
    fn partial_days_are_reported_in_minutes() {
        let config = SimulationConfig {
            duration: Duration::from_secs(90 * 60),
            interval: Duration::from_secs(30 * 60),
            rooms: 3,
            ..SimulationConfig::default()
        };
        assert_eq!(describe_defaults(&config), "90 min every 30 min, 3 room(s), seed 2025");
    }

    #[test]
    fn git_sha_is_shortened() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }
}
