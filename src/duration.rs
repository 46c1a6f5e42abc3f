// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::InvalidDuration;

/// A non-negative clip length, exposed both as whole seconds and as
/// milliseconds so feed extensions with differing units never re-parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClipDuration {
    secs: u64,
}

impl ClipDuration {
    /// Build from a whole number of seconds
    pub fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Whole seconds, as used by media enclosure durations
    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Milliseconds, as used by podcast extension durations
    pub fn as_millis(&self) -> u64 {
        self.secs * 1000
    }
}

/// Parse an ISO-8601 duration string as returned by the YouTube
/// contentDetails API (e.g. `"PT12M34S"`)
///
/// Accepts the day/time subset of the grammar: `PnDTnHnMnS` with every
/// component optional but at least one present. Negative spans, fractional
/// components, and anything else outside the grammar are rejected. YouTube
/// reports whole seconds only, and podcast durations are whole seconds, so
/// sub-second precision has no representation here.
pub fn parse_duration(text: &str) -> Result<ClipDuration, InvalidDuration> {
    let fail = || InvalidDuration {
        text: text.to_string(),
    };

    let rest = text.strip_prefix('P').ok_or_else(fail)?;
    if rest.is_empty() {
        return Err(fail());
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    // "PT" with nothing after it is as malformed as a bare "P"
    if matches!(time_part, Some("")) {
        return Err(fail());
    }

    let mut secs: u64 = 0;
    let mut seen_component = false;

    let mut add = |value: u64, unit_secs: u64| -> Result<(), InvalidDuration> {
        let scaled = value.checked_mul(unit_secs).ok_or_else(fail)?;
        secs = secs.checked_add(scaled).ok_or_else(fail)?;
        seen_component = true;
        Ok(())
    };

    for (value, designator) in components(date_part).ok_or_else(fail)? {
        match designator {
            'D' => add(value, 86_400)?,
            _ => return Err(fail()),
        }
    }

    if let Some(time) = time_part {
        let mut last_rank = 0u8;
        for (value, designator) in components(time).ok_or_else(fail)? {
            // Designators must appear at most once, in H, M, S order
            let rank = match designator {
                'H' => 1,
                'M' => 2,
                'S' => 3,
                _ => return Err(fail()),
            };
            if rank <= last_rank {
                return Err(fail());
            }
            last_rank = rank;
            match designator {
                'H' => add(value, 3_600)?,
                'M' => add(value, 60)?,
                _ => add(value, 1)?,
            }
        }
    }

    if !seen_component {
        return Err(fail());
    }

    // The millisecond representation must exist too
    if secs.checked_mul(1000).is_none() {
        return Err(fail());
    }

    Ok(ClipDuration::from_secs(secs))
}

/// Split a duration part into (value, designator) pairs, e.g. "12M34S" into
/// [(12, 'M'), (34, 'S')]. Returns None on empty numbers, signs, fractions,
/// or trailing digits.
fn components(part: &str) -> Option<Vec<(u64, char)>> {
    let mut pairs = Vec::new();
    let mut digits = String::new();

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.is_ascii_uppercase() {
            if digits.is_empty() {
                return None;
            }
            let value = digits.parse().ok()?;
            pairs.push((value, c));
            digits.clear();
        } else {
            // Covers '-', '+', '.', ',' and lowercase designators
            return None;
        }
    }

    if !digits.is_empty() {
        return None;
    }
    Some(pairs)
}
