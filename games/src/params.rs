//! Game strings: `name` or `name(key=value,...)`
//!
//! Parameters are integers; each game validates the keys it understands.

use arbor_engine::GameError;
use std::collections::BTreeMap;
use std::fmt;

/// Integer parameters attached to a game name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameParameters {
    values: BTreeMap<String, i64>,
}

impl GameParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter `name` as a count no smaller than `min`, or `default` when absent.
    pub fn count(
        &self,
        game: &str,
        name: &str,
        default: usize,
        min: usize,
    ) -> Result<usize, GameError> {
        let Some(raw) = self.get(name) else {
            return Ok(default);
        };
        match usize::try_from(raw) {
            Ok(value) if value >= min => Ok(value),
            _ => Err(GameError::InvalidParameter {
                game: game.to_string(),
                name: name.to_string(),
                reason: format!("expected an integer >= {}, got {}", min, raw),
            }),
        }
    }

    /// Reject any key not in `known`.
    pub fn check_known(&self, game: &str, known: &[&str]) -> Result<(), GameError> {
        match self.values.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(GameError::InvalidParameter {
                game: game.to_string(),
                name: key.clone(),
                reason: "unknown parameter".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for GameParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .values
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>();
        write!(f, "{}", pairs.join(","))
    }
}

/// Split a game string into its name and parameters.
pub fn parse_game_string(spec: &str) -> Result<(String, GameParameters), GameError> {
    let malformed = || GameError::MalformedGameString(spec.to_string());
    let spec_trimmed = spec.trim();
    let Some(open) = spec_trimmed.find('(') else {
        if spec_trimmed.is_empty() || spec_trimmed.contains(')') {
            return Err(malformed());
        }
        return Ok((spec_trimmed.to_string(), GameParameters::new()));
    };
    let name = spec_trimmed[..open].trim();
    let body = spec_trimmed[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    if name.is_empty() || body.contains('(') || body.contains(')') {
        return Err(malformed());
    }
    let mut params = GameParameters::new();
    for pair in body.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
        let value = value.trim().parse::<i64>().map_err(|_| malformed())?;
        params = params.with(key.trim(), value);
    }
    Ok((name.to_string(), params))
}
