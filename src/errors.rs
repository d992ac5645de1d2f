use std::fmt::Display;

#[derive(Debug)]
pub enum QuiesceError {
    BuildErrorNoDelaySet,
    Io(std::io::Error),
}

impl Display for QuiesceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuiesceError::BuildErrorNoDelaySet => {
                write!(f, "Debouncer : Build error  No delay set !")
            }

            QuiesceError::Io(e) => {
                write!(f, "Io error [{:?}]", e.to_string())
            }
        }
    }
}

impl std::error::Error for QuiesceError {}

impl From<std::io::Error> for QuiesceError {
    fn from(value: std::io::Error) -> Self {
        QuiesceError::Io(value)
    }
}
