use std::fmt;

use error::SliderError;
use util::{format_hm, parse_hm, LAST_MINUTE};

/// A time-of-day range in minutes since midnight. `from < until` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    from: u16,
    until: u16,
}

impl TimeInterval {
    pub fn new(from: u16, until: u16) -> Result<Self, SliderError> {
        if from > LAST_MINUTE || until > LAST_MINUTE {
            return Err(SliderError::invalid(format!(
                "{}..{} leaves the day (bounds must be within 0..={})",
                from, until, LAST_MINUTE
            )));
        }
        if from >= until {
            return Err(SliderError::invalid(format!(
                "from ({}) must come before until ({})",
                format_hm(from),
                format_hm(until)
            )));
        }

        Ok(TimeInterval { from, until })
    }

    /// The whole day as the slider shows it by default, 00:00 to 23:59.
    pub fn full_day() -> Self {
        TimeInterval {
            from: 0,
            until: LAST_MINUTE,
        }
    }

    pub fn from(&self) -> u16 {
        self.from
    }

    pub fn until(&self) -> u16 {
        self.until
    }

    pub fn duration(&self) -> u16 {
        self.until - self.from
    }

    pub fn with_from(&self, from: u16) -> Result<Self, SliderError> {
        TimeInterval::new(from, self.until)
    }

    pub fn with_until(&self, until: u16) -> Result<Self, SliderError> {
        TimeInterval::new(self.from, until)
    }

    pub fn parse(from: &str, until: &str) -> Result<Self, SliderError> {
        TimeInterval::new(parse_hm(from)?, parse_hm(until)?)
    }

    pub fn to_external(&self) -> ExternalInterval {
        ExternalInterval {
            from: format_hm(self.from),
            until: format_hm(self.until),
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", format_hm(self.from), format_hm(self.until))
    }
}

/// One of the two draggable endpoints of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    From,
    Until,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Handle::From => write!(f, "from"),
            Handle::Until => write!(f, "until"),
        }
    }
}

/// The "HH:mm" record exchanged with whoever embeds the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalInterval {
    pub from: String,
    pub until: String,
}

impl ExternalInterval {
    pub fn new<S: Into<String>>(from: S, until: S) -> Self {
        ExternalInterval {
            from: from.into(),
            until: until.into(),
        }
    }

    pub fn to_interval(&self) -> Result<TimeInterval, SliderError> {
        TimeInterval::parse(&self.from, &self.until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted_intervals() {
        assert!(TimeInterval::new(100, 100).is_err());
        assert!(TimeInterval::new(200, 100).is_err());
        assert!(TimeInterval::new(0, 1440).is_err());
        assert!(TimeInterval::new(1440, 1441).is_err());
        assert_eq!(TimeInterval::new(0, 1439).unwrap(), TimeInterval::full_day());
    }

    #[test]
    fn moving_a_bound_keeps_the_invariant() {
        let interval = TimeInterval::new(100, 200).unwrap();
        assert_eq!(interval.with_from(150).unwrap().from(), 150);
        assert!(interval.with_from(200).is_err());
        assert!(interval.with_until(100).is_err());
        assert_eq!(interval.with_until(300).unwrap().duration(), 200);
    }

    #[test]
    fn converts_to_and_from_text() {
        let external = ExternalInterval::new("08:30", "17:05");
        let interval = external.to_interval().unwrap();
        assert_eq!((interval.from(), interval.until()), (510, 1025));
        assert_eq!(interval.to_external(), external);
        assert_eq!(interval.to_string(), "08:30-17:05");

        match ExternalInterval::new("18:00", "09:00").to_interval() {
            Err(SliderError::InvalidInterval { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn deserializes_from_json() {
        let parsed: Vec<ExternalInterval> =
            ::serde_json::from_str(r#"[{"from": "06:00", "until": "07:15"}]"#).unwrap();
        assert_eq!(parsed, vec![ExternalInterval::new("06:00", "07:15")]);
    }
}
