use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Binds every aggregate to its identifier type, its lifecycle metadata and
/// the numbered-collection naming convention used for storage tables.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Record id
    fn id(&self) -> Self::Id;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle metadata
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Aggregate class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for storage (e.g. "indicator")
    fn collection_name() -> &'static str;

    /// Singular display name
    fn element_name() -> &'static str;

    /// Plural display name
    fn list_name() -> &'static str;

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full system name (e.g. "a001_indicator"), also the storage table name
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
