/// Result of a call whose failures are absorbed rather than propagated.
///
/// `Fetched` carries whatever the backend returned (which may itself be empty).
/// `Degraded` records that the call failed transiently and the caller should
/// continue with an empty value. Hard failures are expressed with `Result`
/// around this type, never inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Degraded { reason: String },
}

impl<T> FetchOutcome<T> {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Self::Fetched(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    pub fn map<U, F>(self, f: F) -> FetchOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Fetched(value) => FetchOutcome::Fetched(f(value)),
            Self::Degraded { reason } => FetchOutcome::Degraded { reason },
        }
    }

    pub fn into_value_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Fetched(value) => value,
            Self::Degraded { .. } => T::default(),
        }
    }
}
