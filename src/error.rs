use std::error::Error;
use std::fmt;

/// Failure taxonomy for the viewer. Network and parse failures abort the
/// operation that triggered them (the view keeps its previous state);
/// lookup failures signal an index inconsistency in the dataset and are
/// raised instead of reading out of range. Gesture calls in the wrong
/// state are deliberate no-ops and never reach this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerError {
    Network(String),
    Parse(String),
    Lookup(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Network(msg) => write!(f, "network failure: {msg}"),
            ViewerError::Parse(msg) => write!(f, "parse failure: {msg}"),
            ViewerError::Lookup(msg) => write!(f, "lookup failure: {msg}"),
        }
    }
}

impl Error for ViewerError {}
