//! `SESSION_*` toggles and the value parsers behind them.
//!
//! Every toggle follows one rule: a debug build warns and falls back, a
//! release build refuses to start.

use std::time::Duration;

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

/// Whether release builds insist on an explicit value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Presence {
    Required,
    Optional,
}

/// One environment toggle: how its value parses and what a lenient build
/// uses instead.
pub(super) struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    presence: Presence,
    fallback: T,
    parse: fn(&str) -> Option<T>,
}

impl Toggle<bool> {
    /// A required yes/no switch.
    pub(super) fn flag(name: &'static str, fallback: bool) -> Self {
        Self {
            name,
            expected: "1|0|true|false|yes|no|y|n",
            presence: Presence::Required,
            fallback,
            parse: parse_flag,
        }
    }
}

impl Toggle<SameSite> {
    /// A required `SameSite` policy.
    pub(super) fn same_site(name: &'static str, fallback: SameSite) -> Self {
        Self {
            name,
            expected: "Strict|Lax|None",
            presence: Presence::Required,
            fallback,
            parse: parse_same_site,
        }
    }
}

impl Toggle<Duration> {
    /// An optional lifetime in whole hours. Absent means `fallback` in every
    /// build mode.
    pub(super) fn hours(name: &'static str, fallback: Duration) -> Self {
        Self {
            name,
            expected: "a positive number of hours",
            presence: Presence::Optional,
            fallback,
            parse: parse_hours,
        }
    }
}

impl<T> Toggle<T> {
    pub(super) fn read<E: Env>(self, env: &E, mode: BuildMode) -> Result<T, SessionConfigError> {
        let Self {
            name,
            expected,
            presence,
            fallback,
            parse,
        } = self;

        let Some(value) = env.string(name) else {
            return match presence {
                Presence::Optional => Ok(fallback),
                Presence::Required => lenient_in_debug(
                    mode,
                    fallback,
                    SessionConfigError::MissingEnv { name },
                    || warn!(toggle = name, "session toggle not set; using default"),
                ),
            };
        };

        match parse(&value) {
            Some(parsed) => Ok(parsed),
            None => lenient_in_debug(
                mode,
                fallback,
                SessionConfigError::InvalidEnv {
                    name,
                    value: value.clone(),
                    expected,
                },
                || warn!(toggle = name, value = %value, "invalid session toggle; using default"),
            ),
        }
    }
}

/// `fallback` with a warning in debug builds, `error` in release builds.
pub(super) fn lenient_in_debug<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

fn parse_hours(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|hours| *hours > 0)
        .and_then(|hours| hours.checked_mul(3600))
        .map(Duration::from_secs)
}
