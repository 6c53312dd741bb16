use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    IoError(io::Error),
    IniError(ini::ParseError),
    MissingSection(String),
    InvalidValue { key: String, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => write!(f, "IO error: {}", err),
            Error::IniError(ref err) => write!(f, "INI error: {}", err),
            Error::MissingSection(ref section) => write!(f, "section [{}] not found", section),
            Error::InvalidValue { ref key, ref value } => {
                write!(f, "invalid value {:?} for key {:?}", value, key)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            Error::IniError(ref err) => Some(err),
            Error::MissingSection(_) | Error::InvalidValue { .. } => None,
        }
    }
}
