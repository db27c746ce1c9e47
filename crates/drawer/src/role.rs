/// Which side of the replication a drawer instance is on.
///
/// Fixed at construction: exactly one instance per drawer is the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRole {
    /// Samples input and is the source of truth
    Authority,
    /// Mirrors the authority from received snapshots
    Observer,
}

impl NetworkRole {
    pub fn is_authoritative(self) -> bool {
        matches!(self, Self::Authority)
    }
}
