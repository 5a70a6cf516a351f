pub mod aws_client_config;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum::{Display, EnumIter};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to load configuration: {0}")]
    Load(#[from] envy::Error),
}

#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, EnumIter, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Local,
    #[default]
    Development,
    QA,
    Staging,
    Production,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the test configuration. Used by unit and integration tests.
    ///
    /// Sources, in order of precedence:
    ///  - OS environment variables
    ///  - .env.test.local
    ///  - .env.test
    ///  - .env.local
    ///  - .env
    ///
    /// The first source defining a variable wins; nothing already set is overridden.
    pub fn load_test<TConfig>() -> Result<TConfig, ConfigError>
    where
        TConfig: DeserializeOwned,
    {
        dotenv::from_filename(".env.test.local").ok();
        dotenv::from_filename(".env.test").ok();
        ConfigLoader::load::<TConfig>()
    }

    /// Loads the configuration used when running inside AWS.
    ///
    /// Sources, in order of precedence:
    /// - OS environment variables
    /// - `.env.development.local` then `.env.development`
    /// - `.env.qa.local` then `.env.qa`
    /// - `.env.staging.local` then `.env.staging`
    /// - `.env.production.local` then `.env.production`
    /// - `.env.local`
    /// - `.env`
    pub fn load_default<TConfig>() -> Result<TConfig, ConfigError>
    where
        TConfig: DeserializeOwned,
    {
        for environment in Environment::iter() {
            if environment != Environment::Local {
                dotenv::from_filename(format!(".env.{environment}.local")).ok();
                dotenv::from_filename(format!(".env.{environment}")).ok();
            }
        }

        ConfigLoader::load::<TConfig>()
    }

    /// Deserializes a configuration out of an explicit set of variables instead of the process
    /// environment.
    pub fn load_from<TConfig, I>(variables: I) -> Result<TConfig, ConfigError>
    where
        TConfig: DeserializeOwned,
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(variables)?)
    }

    fn load<TConfig>() -> Result<TConfig, ConfigError>
    where
        TConfig: DeserializeOwned,
    {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env").ok();

        Ok(envy::from_env::<TConfig>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        aws_region: String,
        #[serde(default)]
        verbose: bool,
    }

    #[test]
    fn environments_render_as_dotenv_suffixes() {
        let suffixes: Vec<String> = Environment::iter().map(|e| e.to_string()).collect();
        assert_eq!(
            suffixes,
            vec!["local", "development", "qa", "staging", "production"]
        );
    }

    #[test]
    fn load_from_reads_upper_case_variables() {
        let config: Sample = ConfigLoader::load_from(vec![
            ("AWS_REGION".to_owned(), "us-east-1".to_owned()),
            ("VERBOSE".to_owned(), "true".to_owned()),
        ])
        .unwrap();

        assert_eq!(config.aws_region, "us-east-1");
        assert!(config.verbose);
    }

    #[test]
    fn load_from_fails_on_missing_variable() {
        let result = ConfigLoader::load_from::<Sample, _>(Vec::<(String, String)>::new());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
