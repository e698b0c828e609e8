use crate::ManagedTab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show `url` in the managed tab, or in a new tab when `managed` is absent or stale.
    OpenOrUpdateTab {
        url: String,
        managed: Option<ManagedTab>,
    },
    /// Post a `Msg::Drain` continuation back onto the scheduler.
    ResumeDrain,
}
