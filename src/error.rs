use std::{error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bounding box, date range or location text that can't be parsed.
    MalformedInput,
    /// A collection without a usable spatial or temporal extent.
    MissingExtentData,
    /// Catalog, language model or geocoder failure.
    ExternalService,
    Configuration,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::MissingExtentData => "missing extent data",
            ErrorKind::ExternalService => "external service failure",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Internal => "internal error",
        };
        f.write_str(s)
    }
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub fn new<M: Into<String>>(kind: ErrorKind, message: M) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<M, E>(kind: ErrorKind, message: M, err: E) -> Self
    where
        M: Into<String>,
        E: error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    pub fn malformed<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn missing_extent<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::MissingExtentData, message)
    }

    pub fn external<M, E>(message: M, err: E) -> Self
    where
        M: Into<String>,
        E: error::Error + Send + Sync + 'static,
    {
        Self::with_source(ErrorKind::ExternalService, message, err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Search failed: {}", self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}: {}. Source error: {}", self.kind, self.message, err),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(&str, E)> for Error {
    fn from((message, err): (&str, E)) -> Self {
        Self::with_source(ErrorKind::Internal, message, err)
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
