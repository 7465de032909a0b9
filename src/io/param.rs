//! Utilities for parameter files.
//!
//! A parameter file assigns one value per line:
//!
//! ```text
//! ; Planck-like universe
//! H0 = 67.7
//! OmegaDM = 0.26   # cold dark matter
//! omega_baryon = "0.049"
//! ```
//!
//! Lines starting with `;` or `#` are ignored, as is anything following a `;`
//! or `#` after a value. Values may be enclosed in double quotes.

use super::utils;
use crate::{
    constants::fcn,
    cosmology::parameters::ParameterOverrides,
    error::{CosmoError, CosmoResult},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref ASSIGNMENT_REGEX: Regex =
        Regex::new(r"(?m)^[ \t]*([_\w]+)[ \t]*=(.*)$").expect("Invalid assignment regex");
}

/// Representation of a parameter file.
#[derive(Clone, Debug)]
struct ParameterFile {
    text: String,
}

impl ParameterFile {
    /// Reads the parameter file at the given path.
    fn new(param_file_path: &Path) -> CosmoResult<Self> {
        utils::read_text_file(param_file_path)
            .map(Self::from_text)
            .map_err(|err| CosmoError::ParameterFileRead {
                path: param_file_path.display().to_string(),
                message: err.to_string(),
            })
    }

    fn from_text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Returns the (name, value) pairs assigned in the file, in order of
    /// appearance.
    fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        ASSIGNMENT_REGEX.captures_iter(&self.text).filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            let value = strip_comment(captures.get(2)?.as_str()).trim();
            Some((name, value.trim_matches('"')))
        })
    }

    /// Parses the parameter file into a set of overrides.
    fn parse(&self) -> CosmoResult<ParameterOverrides> {
        let mut overrides = ParameterOverrides::default();
        for (name, value) in self.assignments() {
            overrides.set(name, parse_numerical_value(name, value)?)?;
        }
        Ok(overrides)
    }
}

fn strip_comment(value: &str) -> &str {
    match value.find(|c| c == ';' || c == '#') {
        Some(idx) => &value[..idx],
        None => value,
    }
}

fn parse_numerical_value(name: &str, value: &str) -> CosmoResult<fcn> {
    if value.is_empty() {
        return Err(CosmoError::ParameterParse {
            name: name.to_string(),
            value: value.to_string(),
            message: "no value given".to_string(),
        });
    }
    value
        .parse::<fcn>()
        .map_err(|err| CosmoError::ParameterParse {
            name: name.to_string(),
            value: value.to_string(),
            message: err.to_string(),
        })
}

impl ParameterOverrides {
    /// Parses overrides from text in parameter file format.
    ///
    /// Fails with `ParameterParse` for values that are not numbers and with
    /// `UnknownParameter` for unrecognized names. When a name is assigned
    /// more than once, the last assignment applies.
    pub fn from_text(text: &str) -> CosmoResult<Self> {
        ParameterFile::from_text(text).parse()
    }

    /// Reads overrides from the parameter file at the given path.
    pub fn from_file<P: AsRef<Path>>(param_file_path: P) -> CosmoResult<Self> {
        let param_file_path = param_file_path.as_ref();
        log::info!("Reading parameters from {}", param_file_path.display());
        ParameterFile::new(param_file_path)?.parse()
    }

    /// Parses overrides from a JSON object whose keys are the field names of
    /// `ParameterOverrides`.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> CosmoResult<Self> {
        serde_json::from_str(json).map_err(|err| CosmoError::ParameterParse {
            name: "json".to_string(),
            value: format!("line {}, column {}", err.line(), err.column()),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::parameters::CosmologicalParameters;
    use std::io::Write;

    const PARAM_TEXT: &str = "\
; Cosmology for testing
# All densities in units of the critical density

H0 = 67.7
OmegaB      = 0.049   ; baryons
omega_dark_matter = \"0.26\"
OmegaL = 0.691 # cosmological constant
OmegaR=0.0
w = -1
";

    #[test]
    fn assignments_are_parsed_in_order() {
        let file = ParameterFile::from_text(PARAM_TEXT);
        let assignments: Vec<_> = file.assignments().collect();
        assert_eq!(
            assignments,
            vec![
                ("H0", "67.7"),
                ("OmegaB", "0.049"),
                ("omega_dark_matter", "0.26"),
                ("OmegaL", "0.691"),
                ("OmegaR", "0.0"),
                ("w", "-1"),
            ]
        );
    }

    #[test]
    fn overrides_are_read_from_text() {
        let overrides = ParameterOverrides::from_text(PARAM_TEXT).unwrap();
        assert_eq!(overrides.hubble_constant, Some(67.7));
        assert_eq!(overrides.omega_baryon, Some(0.049));
        assert_eq!(overrides.omega_dark_matter, Some(0.26));
        assert_eq!(overrides.omega_dark_energy, Some(0.691));
        assert_eq!(overrides.omega_radiation, Some(0.0));
        assert_eq!(overrides.dark_energy_w, Some(-1.0));
        assert_eq!(overrides.age_estimate, None);

        let parameters = CosmologicalParameters::new(overrides).unwrap();
        assert_eq!(parameters.hubble_constant(), 67.7);
    }

    #[test]
    fn empty_text_gives_no_overrides() {
        assert!(ParameterOverrides::from_text("").unwrap().is_empty());
        assert!(ParameterOverrides::from_text("; nothing\n\n# here\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn last_assignment_wins() {
        let overrides = ParameterOverrides::from_text("H0 = 60\nhubble_constant = 72\n").unwrap();
        assert_eq!(overrides.hubble_constant, Some(72.0));
    }

    #[test]
    fn invalid_values_are_reported() {
        match ParameterOverrides::from_text("H0 = fast\n") {
            Err(CosmoError::ParameterParse { name, value, .. }) => {
                assert_eq!(name, "H0");
                assert_eq!(value, "fast");
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert!(matches!(
            ParameterOverrides::from_text("H0 =\nOmegaB = 0.05\n"),
            Err(CosmoError::ParameterParse { ref name, .. }) if name == "H0"
        ));
        assert!(matches!(
            ParameterOverrides::from_text("OmegaK = 0.0\n"),
            Err(CosmoError::UnknownParameter { ref name }) if name == "OmegaK"
        ));
    }

    #[test]
    fn unreadable_file_is_reported() {
        match ParameterOverrides::from_file("no/such/cosmology.params") {
            Err(CosmoError::ParameterFileRead { path, .. }) => {
                assert!(path.ends_with("cosmology.params"))
            }
            other => panic!("Expected file read error, got {:?}", other),
        }
    }

    #[test]
    fn overrides_are_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PARAM_TEXT.as_bytes()).unwrap();
        assert_eq!(
            ParameterOverrides::from_file(file.path()).unwrap(),
            ParameterOverrides::from_text(PARAM_TEXT).unwrap()
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn overrides_are_read_from_json() {
        let overrides =
            ParameterOverrides::from_json_str(r#"{"hubble_constant": 70.0, "dark_energy_w": -0.9}"#)
                .unwrap();
        assert_eq!(overrides.hubble_constant, Some(70.0));
        assert_eq!(overrides.dark_energy_w, Some(-0.9));
        assert_eq!(overrides.omega_baryon, None);

        assert!(matches!(
            ParameterOverrides::from_json_str(r#"{"H0": 70.0}"#),
            Err(CosmoError::ParameterParse { .. })
        ));
    }
}
