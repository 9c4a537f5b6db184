//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields change the stored value. The update is serialized as the audit
//! `detail` payload (changed fields only).

pub mod entry;
pub mod source;
