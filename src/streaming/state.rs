/// Lifecycle of a chunk adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Not pulled yet
    Fresh,
    Active,
    /// End of sequence or a fatal error was reached; every further pull yields nothing
    Exhausted,
}
