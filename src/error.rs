use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
};

#[derive(Debug, Diagnostic)]
pub enum HuewheelError {
    #[diagnostic(code(huewheel::parse), url(docsrs))]
    Parse {
        #[source_code]
        src: String,
        #[label("could not parse this")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(
        code(huewheel::format),
        url(docsrs),
        help("expected one of: hex, rgb, hsl, hsv, cmyk, lab")
    )]
    UnsupportedFormat {
        #[source_code]
        src: String,
        #[label("unknown color format")]
        err_span: SourceSpan,
    },

    #[diagnostic(code(huewheel::scheme), url(docsrs))]
    UnsupportedScheme {
        #[source_code]
        src: String,
        #[label("unknown palette scheme")]
        err_span: SourceSpan,
    },

    #[diagnostic(code(huewheel::swatches), url(docsrs))]
    InsufficientSwatches {
        scheme: String,
        requested: usize,
        minimum: usize,
    },

    #[diagnostic(code(huewheel::base_color), url(docsrs))]
    InvalidBaseColor { msg: String },

    #[diagnostic(code(huewheel::config), url(docsrs))]
    Config {
        #[source_code]
        src: String,
        #[label("invalid configuration")]
        err_span: SourceSpan,
        msg: String,
    },
}

pub type HuewheelResult<T> = miette::Result<T>;

impl Display for HuewheelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            HuewheelError::Parse { msg, .. } => write!(f, "Parse error: {}", msg),
            HuewheelError::UnsupportedFormat { src, .. } => {
                write!(f, "Unsupported color format: {}", src)
            }
            HuewheelError::UnsupportedScheme { src, .. } => {
                write!(f, "Unsupported palette scheme: {}", src)
            }
            HuewheelError::InsufficientSwatches {
                scheme,
                requested,
                minimum,
            } => write!(
                f,
                "A {} palette needs at least {} swatches, got {}",
                scheme, minimum, requested
            ),
            HuewheelError::InvalidBaseColor { msg } => write!(f, "Invalid base color: {}", msg),
            HuewheelError::Config { msg, .. } => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for HuewheelError {}

impl HuewheelError {
    pub fn parse(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Parse {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    /// Flags the whole of `src` as an unknown format name.
    pub fn unsupported_format(src: impl Into<String>) -> Self {
        let src = src.into();
        let err_span = (0, src.len()).into();
        Self::UnsupportedFormat { src, err_span }
    }

    /// Flags the whole of `src` as an unknown scheme identifier.
    pub fn unsupported_scheme(src: impl Into<String>) -> Self {
        let src = src.into();
        let err_span = (0, src.len()).into();
        Self::UnsupportedScheme { src, err_span }
    }

    pub fn insufficient_swatches(
        scheme: impl Into<String>,
        requested: usize,
        minimum: usize,
    ) -> Self {
        Self::InsufficientSwatches {
            scheme: scheme.into(),
            requested,
            minimum,
        }
    }

    pub fn invalid_base_color(msg: impl Into<String>) -> Self {
        Self::InvalidBaseColor { msg: msg.into() }
    }

    pub fn config(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Config {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }
}
