use qtty::Degrees;

use crate::core::error::{RelposError, Result};

/// Fields of one pointing-log line: `<ra> <dec> <image label>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointingLine {
    pub ra: Degrees,
    pub dec: Degrees,
    pub label: String,
}

/// Parser for whitespace-delimited pointing-log lines
pub struct LineParser;

impl LineParser {
    /// Parse one line.
    ///
    /// Blank lines yield `Ok(None)`. Tokens after the third are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::parsing::LineParser;
    ///
    /// let line = LineParser::parse("10.5 -20.25 G005_mon_objt_171028T12000000.fit\n")
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(line.ra.value(), 10.5);
    /// assert_eq!(line.dec.value(), -20.25);
    /// assert_eq!(line.label, "G005_mon_objt_171028T12000000.fit");
    ///
    /// assert!(LineParser::parse("   \r\n").unwrap().is_none());
    /// assert!(LineParser::parse("10.5 -20.25").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<PointingLine>> {
        let mut tokens = line.split_whitespace();
        let Some(ra_token) = tokens.next() else {
            return Ok(None);
        };

        let (Some(dec_token), Some(label)) = (tokens.next(), tokens.next()) else {
            return Err(RelposError::MalformedLine(format!(
                "expected <ra> <dec> <label>, got '{}'",
                line.trim()
            )));
        };

        Ok(Some(PointingLine {
            ra: Degrees::new(parse_angle(ra_token, "right ascension")?),
            dec: Degrees::new(parse_angle(dec_token, "declination")?),
            label: label.to_string(),
        }))
    }
}

fn parse_angle(token: &str, what: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RelposError::MalformedLine(format!(
            "invalid {}: '{}'",
            what, token
        ))),
    }
}
