//! Typed views over an element's string value: get/set as integer,
//! decimal, date, date-time, text, or bool, bound to the canonical HL7
//! lexical forms (`YYYYMMDD`, `YYYYMMDDHHMMSS`, `.` decimal separator).

use crate::error::{Hl7Error, Result};

#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime};

/// A typed view bound to one element's current string value.
///
/// Parse failures on a getter yield the neutral value (`0`, `false`,
/// `None`) rather than propagating, unless constructed with
/// [`Converter::strict`].
pub struct Converter {
    value: String,
    strict: bool,
}

impl Converter {
    pub fn new(value: impl Into<String>) -> Self {
        Converter {
            value: value.into(),
            strict: false,
        }
    }

    pub fn strict(value: impl Into<String>) -> Self {
        Converter {
            value: value.into(),
            strict: true,
        }
    }

    fn fail_or_default<T: Default>(&self, reason: impl Into<String>) -> Result<T> {
        if self.strict {
            Err(Hl7Error::ConversionFailure(reason.into()))
        } else {
            Ok(T::default())
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        if self.value.is_empty() {
            return Ok(0);
        }
        match self.value.trim().parse::<i64>() {
            Ok(v) => Ok(v),
            Err(e) => self.fail_or_default(format!("{e} parsing {:?} as int", self.value)),
        }
    }

    pub fn as_decimal(&self) -> Result<f64> {
        if self.value.is_empty() {
            return Ok(0.0);
        }
        match self.value.trim().parse::<f64>() {
            Ok(v) => Ok(v),
            Err(e) => self.fail_or_default(format!("{e} parsing {:?} as decimal", self.value)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.value.trim() {
            "" => Ok(false),
            "Y" | "y" | "1" | "true" | "TRUE" => Ok(true),
            "N" | "n" | "0" | "false" | "FALSE" => Ok(false),
            other => {
                if self.strict {
                    Err(Hl7Error::ConversionFailure(format!(
                        "{other:?} is not a recognized boolean"
                    )))
                } else {
                    Ok(false)
                }
            }
        }
    }

    pub fn as_text(&self) -> String {
        self.value.to_string()
    }

    #[cfg(feature = "chrono")]
    pub fn as_date(&self) -> Result<Option<NaiveDate>> {
        if self.value.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(self.value.trim(), "%Y%m%d") {
            Ok(d) => Ok(Some(d)),
            Err(e) => {
                if self.strict {
                    Err(Hl7Error::ConversionFailure(format!(
                        "{e} parsing {:?} as YYYYMMDD",
                        self.value
                    )))
                } else {
                    Ok(None)
                }
            }
        }
    }

    #[cfg(feature = "chrono")]
    pub fn as_date_time(&self) -> Result<Option<NaiveDateTime>> {
        if self.value.is_empty() {
            return Ok(None);
        }
        match NaiveDateTime::parse_from_str(self.value.trim(), "%Y%m%d%H%M%S") {
            Ok(d) => Ok(Some(d)),
            Err(e) => {
                if self.strict {
                    Err(Hl7Error::ConversionFailure(format!(
                        "{e} parsing {:?} as YYYYMMDDHHMMSS",
                        self.value
                    )))
                } else {
                    Ok(None)
                }
            }
        }
    }
}

pub fn format_int(value: i64) -> String {
    value.to_string()
}

pub fn format_decimal(value: f64) -> String {
    let mut s = format!("{value}");
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

pub fn format_bool(value: bool) -> String {
    if value { "Y" } else { "N" }.to_string()
}

#[cfg(feature = "chrono")]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%Y%m%d").to_string()
}

#[cfg(feature = "chrono")]
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%Y%m%d%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_neutral() {
        assert_eq!(Converter::new("").as_int().unwrap(), 0);
        assert_eq!(Converter::new("").as_decimal().unwrap(), 0.0);
        assert!(!Converter::new("").as_bool().unwrap());
        assert_eq!(Converter::new("").as_text(), "");
    }

    #[test]
    fn unparseable_int_is_neutral_unless_strict() {
        assert_eq!(Converter::new("abc").as_int().unwrap(), 0);
        assert!(Converter::strict("abc").as_int().is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn date_round_trips_canonical_form() {
        let date = Converter::new("20240131").as_date().unwrap().unwrap();
        assert_eq!(format_date(date), "20240131");
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn datetime_round_trips_canonical_form() {
        let dt = Converter::new("20240131235901")
            .as_date_time()
            .unwrap()
            .unwrap();
        assert_eq!(format_date_time(dt), "20240131235901");
    }
}
