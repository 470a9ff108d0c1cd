/// Everything the editing core can refuse to do. A failed operation leaves the
/// model untouched.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum SliderError {
    #[fail(display = "Invalid interval: {}", reason)]
    InvalidInterval { reason: String },
    #[fail(display = "Interval index {} out of range (have {})", index, len)]
    IndexOutOfRange { index: usize, len: usize },
    #[fail(display = "Precondition violated: {}", reason)]
    PreconditionViolation { reason: String },
}

impl SliderError {
    pub fn invalid<S: Into<String>>(reason: S) -> Self {
        SliderError::InvalidInterval {
            reason: reason.into(),
        }
    }
}
