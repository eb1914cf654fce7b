use thiserror::Error;

/// Errors the generator can raise. None of these are recovered locally — the
/// caller (`main`) reports and aborts. There is no retry semantics.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("exhausted unique-value search for {namespace} after {attempts} attempts")]
    UniqueValueExhausted {
        namespace: &'static str,
        attempts: u32,
    },

    #[error("weighted choice failed: weight map for {context} was empty or summed to zero")]
    WeightedChoiceFailed { context: &'static str },

    #[error("sampled without replacement for {context} but only {available} of {requested} items exist")]
    InsufficientPopulation {
        context: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
