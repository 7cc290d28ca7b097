use serde::{Deserialize, Serialize};
/// What to do with records whose parent never appears in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrphanPolicy {
    /// Surface orphaned subtrees as roots in place of their missing parent.
    #[default]
    Promote,
    /// Leave orphaned subtrees out of the forest.
    Drop,
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalOptions {
    pub orphans: OrphanPolicy,
}
#[derive(Debug, Default)]
pub struct MarshalBuilder {
    options: MarshalOptions,
}
impl MarshalBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn orphans(mut self, policy: OrphanPolicy) -> Self {
        self.options.orphans = policy;
        self
    }
    pub fn build(self) -> MarshalOptions {
        self.options
    }
}
