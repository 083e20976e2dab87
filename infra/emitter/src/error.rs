use std::borrow::Cow;

/// Errors reported by [`Emitter::try_emit`](crate::Emitter::try_emit).
///
/// Plain registration, removal and [`Emitter::emit`](crate::Emitter::emit)
/// never fail.
#[beacon_derive::beacon_error]
pub enum EmitterError {
    /// A listener panicked; the rest of that emission was skipped.
    #[error("Listener panicked{}: {message}", format_context(.context))]
    ListenerPanicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A stored listener set did not match the payload type of its key.
    ///
    /// Not reachable through the public API: every [`KeyId`](crate::KeyId)
    /// belongs to exactly one `EventKey<P>`, so a key's set always holds
    /// `Listener<P>`. It only guards the type-erased storage.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
