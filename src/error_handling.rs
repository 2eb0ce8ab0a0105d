use std::collections::BTreeSet;
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq + Ord + Copy {}

// Where in the grammar text a problem was found
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    // 1-based position of the rule among the `;`-separated rules
    pub rule: usize,
    pub text: String
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rule {}: `{}`", self.rule, self.text)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

// The distinct kinds among a list of errors, in their natural order
pub fn kinds<T: ErrorType>(errors: &Errors<T>) -> BTreeSet<T> {
    errors.iter().map(|e| e.error).collect()
}
