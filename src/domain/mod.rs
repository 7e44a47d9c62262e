// Domain layer - Panel identities, wire payloads and normalized records
pub mod panel;
pub mod payload;
pub mod records;
