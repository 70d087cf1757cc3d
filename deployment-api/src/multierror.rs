use std::fmt;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Collects every error raised by a group of checks under a common prefix.
#[derive(Debug, Default)]
pub struct Prefixed {
    prefix: String,
    errors: Vec<BoxError>,
}

impl Prefixed {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            errors: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn push<E: Into<BoxError>>(&mut self, err: E) {
        let err = err.into();
        match err.downcast::<Prefixed>() {
            Ok(nested) => self.extend(*nested),
            Err(err) => self.errors.push(err),
        }
    }

    fn extend(&mut self, nested: Prefixed) {
        for err in nested.errors {
            let labelled = if nested.prefix.is_empty() {
                err.to_string()
            } else {
                format!("{}: {}", nested.prefix, err)
            };
            self.errors.push(labelled.into());
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    /// Returns `Ok(())` when nothing was collected, the accumulator otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Prefixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.prefix.is_empty() {
            write!(f, "{}: ", self.prefix)?;
        }

        match self.errors.len() {
            1 => writeln!(f, "1 error occurred:")?,
            n => writeln!(f, "{} errors occurred:", n)?,
        }

        for err in &self.errors {
            writeln!(f, "\t* {}", err)?;
        }

        writeln!(f)
    }
}

impl std::error::Error for Prefixed {}
