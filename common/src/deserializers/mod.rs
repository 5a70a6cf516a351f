//! `deserialize_with` helpers for configuration values that arrive as plain strings.

use rusoto_core::Region;
use serde::de::Visitor;
use serde::{de, Deserializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

struct ParsedStrVisitor<T> {
    expecting: &'static str,
    value: PhantomData<T>,
}

impl<T> ParsedStrVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            value: PhantomData,
        }
    }
}

impl<'de, T: FromStr> Visitor<'de> for ParsedStrVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        T::from_str(s.trim()).map_err(|_| {
            de::Error::custom(format!(r#"expected {}, found "{s}""#, self.expecting))
        })
    }
}

/// Reads an AWS region name such as `us-west-2`.
pub fn aws_region<'de, D>(deserializer: D) -> Result<Region, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(ParsedStrVisitor::new("a valid AWS region"))
}

/// Reads a log level such as `info` or `WARN`.
pub fn level_filter<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(ParsedStrVisitor::new(
        "one of off, error, warn, info, debug or trace",
    ))
}
