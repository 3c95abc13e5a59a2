//! Typed access to resolved raw values, keyed by descriptor.

use std::path::PathBuf;
use std::str::FromStr;

use super::error::ConfigError;
use super::schema::OptionDescriptor;
use super::source::{RawValue, RawValues};
use crate::parsers::{parse_bool, ValueError};

pub(crate) struct Fields<'a> {
    values: &'a RawValues,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(values: &'a RawValues) -> Self {
        Self { values }
    }

    /// The single raw value of an option, if any tier provided one.
    pub(crate) fn single(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<Option<&'a str>, ConfigError> {
        match self.values.get(descriptor).map(|raw| &raw.value) {
            None => Ok(None),
            Some(RawValue::Single(value)) => Ok(Some(value.as_str())),
            Some(RawValue::List(values)) => Err(ConfigError::invalid(
                descriptor.key,
                &values.join(", "),
                ValueError::Malformed {
                    expected: "a single value",
                },
            )),
        }
    }

    pub(crate) fn required(&self, descriptor: &'static OptionDescriptor) -> Result<&'a str, ConfigError> {
        self.single(descriptor)?
            .ok_or(ConfigError::MissingRequiredOption {
                key: descriptor.key,
            })
    }

    /// List values; a single value counts as a one-element list.
    pub(crate) fn list(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<Vec<&'a str>, ConfigError> {
        Ok(match self.values.get(descriptor).map(|raw| &raw.value) {
            None => Vec::new(),
            Some(RawValue::Single(value)) => vec![value.as_str()],
            Some(RawValue::List(values)) => values.iter().map(String::as_str).collect(),
        })
    }

    pub(crate) fn parse<T>(&self, descriptor: &'static OptionDescriptor) -> Result<T, ConfigError>
    where
        T: FromStr<Err = ValueError>,
    {
        let value = self.required(descriptor)?;
        value
            .parse()
            .map_err(|source| ConfigError::invalid(descriptor.key, value, source))
    }

    /// Absent or empty values yield `None`.
    pub(crate) fn parse_optional<T>(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<Option<T>, ConfigError>
    where
        T: FromStr<Err = ValueError>,
    {
        match self.single(descriptor)?.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|source| ConfigError::invalid(descriptor.key, value, source)),
        }
    }

    pub(crate) fn parse_list<T>(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<Vec<T>, ConfigError>
    where
        T: FromStr<Err = ValueError>,
    {
        self.list(descriptor)?
            .into_iter()
            .map(|value| {
                value
                    .parse()
                    .map_err(|source| ConfigError::invalid(descriptor.key, value, source))
            })
            .collect()
    }

    pub(crate) fn parse_with<T>(
        &self,
        descriptor: &'static OptionDescriptor,
        parser: fn(&str) -> Result<T, ValueError>,
    ) -> Result<T, ConfigError> {
        let value = self.required(descriptor)?;
        parser(value).map_err(|source| ConfigError::invalid(descriptor.key, value, source))
    }

    pub(crate) fn flag(&self, descriptor: &'static OptionDescriptor) -> Result<bool, ConfigError> {
        self.parse_with(descriptor, parse_bool)
    }

    /// A non-empty path, if one was given.
    pub(crate) fn path(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<Option<PathBuf>, ConfigError> {
        Ok(self
            .single(descriptor)?
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from))
    }

    pub(crate) fn required_path(
        &self,
        descriptor: &'static OptionDescriptor,
    ) -> Result<PathBuf, ConfigError> {
        self.path(descriptor)?
            .ok_or(ConfigError::MissingRequiredOption {
                key: descriptor.key,
            })
    }
}
