//! Raw option values and the source tiers they come from.

use std::collections::BTreeMap;
use std::fmt;

use super::overlay::Overlay;
use super::schema::{DefaultValue, OptionDescriptor, REGISTRY};

/// Where a raw value came from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    CommandLine,
    File,
    Default,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::CommandLine => "command line",
            Tier::File => "configuration file",
            Tier::Default => "default",
        })
    }
}

/// A value before typed parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptionValue {
    pub tier: Tier,
    pub value: RawValue,
}

/// Raw values keyed by option, either for one tier or already merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawValues {
    values: BTreeMap<&'static str, RawOptionValue>,
}

impl RawValues {
    /// The built-in defaults of every option that has one.
    pub fn defaults() -> Self {
        let mut values = Self::default();
        for descriptor in REGISTRY.iter() {
            let value = match descriptor.default {
                DefaultValue::None => continue,
                DefaultValue::Value(value) => RawValue::Single(value.to_string()),
                DefaultValue::EmptyList => RawValue::List(Vec::new()),
            };
            values.insert(descriptor, Tier::Default, value);
        }
        values
    }

    pub fn insert(&mut self, descriptor: &'static OptionDescriptor, tier: Tier, value: RawValue) {
        self.values
            .insert(descriptor.key, RawOptionValue { tier, value });
    }

    pub fn get(&self, descriptor: &OptionDescriptor) -> Option<&RawOptionValue> {
        self.values.get(descriptor.key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RawOptionValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

impl Overlay for RawValues {
    /// Replaces whole entries: a list from a higher tier is never merged with
    /// a lower tier's list.
    fn overlay(mut self, overrides: Self) -> Self {
        self.values.extend(overrides.values);
        self
    }
}
