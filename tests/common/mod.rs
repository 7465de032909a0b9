use cosmocalc::{CosmologicalParameters, ParameterOverrides};
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};

#[macro_export]
macro_rules! def_test {
    (
        IN[$($in_ident:ident = $in_str:expr),*]
        fn $name:ident $test_body:expr
    ) => {
        #[test]
        fn $name() {
            $( let $in_ident = common::CONTEXT.input_path($in_str); )*

            let test_body = |$( $in_ident: &std::path::Path, )*| $test_body;

            test_body($( $in_ident.as_path(), )*);
        }
    };
}

/// Redshifts spanning today to recombination.
pub const REDSHIFTS: [f64; 8] = [0.0, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 1100.0];

pub fn parameters_from_file<P: AsRef<Path>>(param_file_path: P) -> CosmologicalParameters {
    let param_file_path = param_file_path.as_ref();
    let overrides = ParameterOverrides::from_file(param_file_path).unwrap_or_else(|err| {
        panic!(
            "Could not read parameter file {}: {}",
            param_file_path.display(),
            err
        )
    });
    CosmologicalParameters::new(overrides).unwrap_or_else(|err| {
        panic!(
            "Invalid parameters in {}: {}",
            param_file_path.display(),
            err
        )
    })
}

pub fn assert_relatively_close(actual: f64, expected: f64, max_relative: f64) {
    assert!(
        approx::relative_eq!(actual, expected, max_relative = max_relative),
        "{:e} and {:e} differ by more than a fraction {:e}",
        actual,
        expected,
        max_relative
    );
}

#[derive(Debug, Clone)]
pub struct TestContext {
    base_input_dir: PathBuf,
}

impl TestContext {
    const BASE_INPUT_DIR_PATH_COMPONENTS: [&'static str; 3] = ["tests", "data", "input"];

    fn new() -> Self {
        let base_input_dir: PathBuf = Self::BASE_INPUT_DIR_PATH_COMPONENTS.iter().collect();
        Self { base_input_dir }
    }

    pub fn input_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.base_input_dir.join(file_name.as_ref())
    }
}

lazy_static! {
    pub static ref CONTEXT: TestContext = TestContext::new();
}
