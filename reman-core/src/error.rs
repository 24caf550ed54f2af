use std::error::Error;
use std::fmt;

/// The kind of failure reported by a [`Manager`](crate::Manager) operation.
///
/// Kept private so that callers match against [`ReManError`]'s predicate
/// methods rather than the enum directly, leaving room to add variants
/// later without breaking anyone matching on them.
#[derive(Debug)]
pub(crate) enum ErrorKind {
    /// Out-of-range counts, a vector entry outside `{0,1}`, a release that
    /// exceeds the current allocation, or a claim that would drive `Need`
    /// negative.
    InvalidArgument(String),
    /// A per-thread operation was attempted without a prior, still-live
    /// `connect`.
    NotConnected,
    /// `connect(t)` was called on a slot that is already occupied.
    AlreadyConnected,
    /// `claim` was called while the manager was not configured for
    /// deadlock avoidance.
    NotAvailable,
    /// `request` asked for more than the thread's remaining `Need` under
    /// avoidance.
    ExceedsClaim,
}

/// Error type returned by every fallible [`Manager`](crate::Manager) operation.
///
/// A failed operation never mutates state and never suspends: see the
/// per-method documentation for exactly what is and is not touched on
/// failure.
#[derive(Debug)]
pub struct ReManError {
    kind: ErrorKind,
}

impl ReManError {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        ReManError { kind }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(reason.into()))
    }

    pub(crate) fn not_connected() -> Self {
        Self::new(ErrorKind::NotConnected)
    }

    pub(crate) fn already_connected() -> Self {
        Self::new(ErrorKind::AlreadyConnected)
    }

    pub(crate) fn not_available() -> Self {
        Self::new(ErrorKind::NotAvailable)
    }

    pub(crate) fn exceeds_claim() -> Self {
        Self::new(ErrorKind::ExceedsClaim)
    }

    /// True if this is an [`ErrorKind::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument(_))
    }

    /// True if this is an [`ErrorKind::NotConnected`].
    pub fn is_not_connected(&self) -> bool {
        matches!(self.kind, ErrorKind::NotConnected)
    }

    /// True if this is an [`ErrorKind::AlreadyConnected`].
    pub fn is_already_connected(&self) -> bool {
        matches!(self.kind, ErrorKind::AlreadyConnected)
    }

    /// True if this is an [`ErrorKind::NotAvailable`].
    pub fn is_not_available(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAvailable)
    }

    /// True if this is an [`ErrorKind::ExceedsClaim`].
    pub fn is_exceeds_claim(&self) -> bool {
        matches!(self.kind, ErrorKind::ExceedsClaim)
    }
}

impl fmt::Display for ReManError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            ErrorKind::NotConnected => write!(f, "calling thread is not connected"),
            ErrorKind::AlreadyConnected => write!(f, "thread slot is already connected"),
            ErrorKind::NotAvailable => write!(f, "deadlock avoidance is not enabled"),
            ErrorKind::ExceedsClaim => write!(f, "request exceeds the thread's remaining need"),
        }
    }
}

impl Error for ReManError {}
