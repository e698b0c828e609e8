#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A caller asked for a dictionary page to be displayed.
    LookupRequested(String),
    /// Continuation posted after a request finished; starts the next one if idle.
    Drain,
    /// The in-flight request finished, successfully or not.
    LookupFinished(crate::LookupOutcome),
    /// The browser reported that a tab was closed.
    TabRemoved(crate::TabId),
}
