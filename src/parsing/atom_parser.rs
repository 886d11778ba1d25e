use crate::core::Event;

const EVENT_PREFIX: &str = "event(";

/// Confidence levels emitted by the solver.
pub const CONFIDENCE_LEVELS: [u8; 3] = [1, 2, 3];

/// Argument layout of an `event(...)` atom.
///
/// Two layouts exist and the arity alone does not tell them apart: an atom with a
/// trailing extra argument is still read as `Plain` when its fourth argument is an
/// interval. The fourth argument decides: a leading `(` marks an interval, anything
/// else is an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomShape<'a> {
    /// `event(ID, TYPE, PATIENT, (START,END), CONFIDENCE)`
    Plain { interval: &'a str, confidence: &'a str },
    /// `event(ID, TYPE, PATIENT, ATTRIBUTE, (START,END), CONFIDENCE)`
    Attributed { attribute: &'a str, interval: &'a str, confidence: &'a str },
}

impl<'a> AtomShape<'a> {
    /// Classify already-split arguments. Returns `None` when the arguments the shape
    /// requires are missing.
    pub fn classify(args: &[&'a str]) -> Option<Self> {
        if args.len() < 5 {
            return None;
        }
        if args[3].starts_with('(') {
            Some(AtomShape::Plain { interval: args[3], confidence: args[4] })
        } else {
            Some(AtomShape::Attributed {
                attribute: args[3],
                interval: args[4],
                confidence: args.get(5)?,
            })
        }
    }

    pub fn attribute(&self) -> Option<&'a str> {
        match self {
            AtomShape::Plain { .. } => None,
            AtomShape::Attributed { attribute, .. } => Some(attribute),
        }
    }

    pub fn interval(&self) -> &'a str {
        match self {
            AtomShape::Plain { interval, .. } | AtomShape::Attributed { interval, .. } => interval,
        }
    }

    pub fn confidence(&self) -> &'a str {
        match self {
            AtomShape::Plain { confidence, .. } | AtomShape::Attributed { confidence, .. } => {
                confidence
            }
        }
    }
}

/// Split an atom body on top-level commas.
///
/// Commas nested inside parentheses do not split. Every argument is trimmed; a
/// trailing empty argument is dropped.
pub fn split_arguments(body: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                args.push(body[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }

    if start < body.len() {
        args.push(body[start..].trim());
    }

    args
}

/// Parse an interval term such as `(10,20)` into its two bounds.
///
/// Parentheses are ignored wherever they appear; anything after the second
/// comma-separated part is ignored.
pub fn parse_interval(raw: &str) -> Option<(i64, i64)> {
    let cleaned: String = raw.chars().filter(|c| *c != '(' && *c != ')').collect();
    let mut parts = cleaned.split(',');
    let start = parse_time_point(parts.next()?)?;
    let end = parse_time_point(parts.next()?)?;
    Some((start, end))
}

/// A solver time point: an integer, or a float literal with an integral value
/// (`1e3`, `20.0`). Fractional values do not parse.
fn parse_time_point(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value: f64 = raw.parse().ok()?;
    #[allow(clippy::cast_precision_loss)]
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// Normalize a confidence value into `1..=3`.
///
/// Exact levels pass through; anything else is rounded to the nearest integer and
/// clamped. A blank or non-numeric value gets the lowest level.
#[allow(clippy::float_cmp)]
pub fn normalize_confidence(raw: &str) -> u8 {
    let value = match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => return CONFIDENCE_LEVELS[0],
    };
    if let Some(level) = CONFIDENCE_LEVELS.iter().find(|level| f64::from(**level) == value) {
        return *level;
    }
    value.round().clamp(1.0, 3.0) as u8
}

/// Decode one solver atom into an [`Event`].
///
/// Returns `None` for anything that is not a well-formed event fact; callers skip those.
pub fn decode_event_atom(atom: &str) -> Option<Event> {
    let body = atom.strip_prefix(EVENT_PREFIX)?.strip_suffix(')')?;
    let args = split_arguments(body);
    let shape = AtomShape::classify(&args)?;

    let (start, end) = parse_interval(shape.interval())?;
    let confidence = normalize_confidence(shape.confidence());

    Some(Event {
        id: args[0].to_string(),
        event_type: args[1].to_string(),
        patient_id: args[2].to_string(),
        attribute: shape.attribute().map(str::to_string),
        start,
        end,
        confidence,
        raw: atom.to_string(),
    })
}
