use common::config::Environment;
use common::deserializers::level_filter;
use serde::{self, Deserialize};
use tracing::level_filters::LevelFilter;

#[derive(Deserialize, Clone, Debug)]
pub struct GlobalConfig {
    /// Deployment environment, `development` unless `ENVIRONMENT` says otherwise.
    #[serde(default)]
    pub environment: Environment,

    /// Maximum level written to the logs.
    #[serde(default = "default_log_level", deserialize_with = "level_filter")]
    pub log_level: LevelFilter,
}

fn default_log_level() -> LevelFilter {
    LevelFilter::WARN
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::ConfigLoader;

    #[test]
    fn defaults_apply_when_unset() {
        let config: GlobalConfig =
            ConfigLoader::load_from(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_level, LevelFilter::WARN);
    }

    #[test]
    fn settings_are_read_from_environment() {
        let config: GlobalConfig = ConfigLoader::load_from(vec![
            ("LOG_LEVEL".to_owned(), "debug".to_owned()),
            ("ENVIRONMENT".to_owned(), "qa".to_owned()),
        ])
        .unwrap();

        assert_eq!(config.environment, Environment::QA);
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let result = ConfigLoader::load_from::<GlobalConfig, _>(vec![(
            "ENVIRONMENT".to_owned(),
            "moon".to_owned(),
        )]);

        assert!(result.is_err());
    }
}
