//! `filter:*` option resolution.
//!
//! Callers keep free-form string options ("artifacts") alongside an image;
//! this module reads the ones that tune filter construction into a
//! [`FilterOverrides`].

use crate::error::OptionError;
use crate::filter::{FilterOverrides, FilterType};
use log::warn;
use std::collections::{BTreeMap, HashMap};

pub const FILTER_KEY: &str = "filter:filter";
pub const WINDOW_KEY: &str = "filter:window";
pub const LOBES_KEY: &str = "filter:lobes";
pub const SUPPORT_KEY: &str = "filter:support";
pub const WINDOW_SUPPORT_KEY: &str = "filter:win-support";
pub const B_KEY: &str = "filter:b";
pub const C_KEY: &str = "filter:c";
pub const BLUR_KEY: &str = "filter:blur";
pub const SIGMA_KEY: &str = "filter:sigma";
pub const KAISER_BETA_KEY: &str = "filter:kaiser-beta";
pub const KAISER_ALPHA_KEY: &str = "filter:kaiser-alpha";
/// Older spelling of `filter:kaiser-beta`, read only when that key is absent.
pub const ALPHA_KEY: &str = "filter:alpha";

/// Named string option lookup.
pub trait ArtifactSource {
    fn artifact(&self, key: &str) -> Option<&str>;
}

impl ArtifactSource for HashMap<String, String> {
    fn artifact(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ArtifactSource for BTreeMap<String, String> {
    fn artifact(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// No options at all.
impl ArtifactSource for () {
    fn artifact(&self, _key: &str) -> Option<&str> {
        None
    }
}

fn parse_number<A: ArtifactSource + ?Sized>(
    source: &A,
    key: &str,
) -> Result<Option<f64>, OptionError> {
    let Some(value) = source.artifact(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| OptionError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

// Unknown names are dropped so a typo falls back to the default filter.
fn parse_filter<A: ArtifactSource + ?Sized>(source: &A, key: &str) -> Option<FilterType> {
    let value = source.artifact(key)?;
    match value.parse::<FilterType>() {
        Ok(filter) => Some(filter),
        Err(e) => {
            warn!("ignoring {key}: {e}");
            None
        }
    }
}

impl FilterOverrides {
    /// Read every `filter:*` key understood by filter construction.
    ///
    /// Numeric values that fail to parse are errors; unknown filter names
    /// are logged and ignored. `filter:lobes` truncates toward zero.
    /// `filter:kaiser-beta` takes precedence over `filter:alpha`.
    pub fn from_artifacts<A: ArtifactSource + ?Sized>(source: &A) -> Result<Self, OptionError> {
        Ok(Self {
            filter: parse_filter(source, FILTER_KEY),
            window: parse_filter(source, WINDOW_KEY),
            lobes: parse_number(source, LOBES_KEY)?.map(|v| v as i64),
            support: parse_number(source, SUPPORT_KEY)?,
            window_support: parse_number(source, WINDOW_SUPPORT_KEY)?,
            b: parse_number(source, B_KEY)?,
            c: parse_number(source, C_KEY)?,
            blur: parse_number(source, BLUR_KEY)?,
            sigma: parse_number(source, SIGMA_KEY)?,
            kaiser_beta: match parse_number(source, KAISER_BETA_KEY)? {
                Some(beta) => Some(beta),
                None => parse_number(source, ALPHA_KEY)?,
            },
            kaiser_alpha: parse_number(source, KAISER_ALPHA_KEY)?,
        })
    }
}
