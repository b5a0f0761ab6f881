//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! Workflow の run と domain は ULID で識別します。
//! `Id<T>` は PhantomData のマーカー型で RunId と DomainId を区別し、
//! 共通実装は一箇所にまとめています。
//!
//! ID はサイズ計測の対象外です（永続化層のキーとして保持されるだけ）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"run-", "domain-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 新しい ID を生成（現在時刻ベース）
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> Default for Id<T> {
    fn default() -> Self {
        Self::from_ulid(Ulid::nil())
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Workflow run のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Run {}

impl IdMarker for Run {
    fn prefix() -> &'static str {
        "run-"
    }
}

/// Domain のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {}

impl IdMarker for Domain {
    fn prefix() -> &'static str {
        "domain-"
    }
}

/// Identifier of a single run of a workflow execution.
pub type RunId = Id<Run>;

/// Identifier of the domain (namespace) owning a workflow.
pub type DomainId = Id<Domain>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let ulid1 = Ulid::new();
        let ulid2 = Ulid::new();

        let run = RunId::from_ulid(ulid1);
        let domain = DomainId::from_ulid(ulid2);

        assert_eq!(run.as_ulid(), ulid1);
        assert_eq!(domain.as_ulid(), ulid2);

        assert!(run.to_string().starts_with("run-"));
        assert!(domain.to_string().starts_with("domain-"));
    }

    #[test]
    fn ids_serialize_as_bare_ulid_string() {
        let ulid = Ulid::new();
        let run_id = RunId::from_ulid(ulid);

        let serialized = serde_json::to_string(&run_id).unwrap();
        assert_eq!(serialized, format!("\"{ulid}\""));

        let deserialized: RunId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(run_id, deserialized);
    }

    #[test]
    fn default_id_is_nil() {
        assert_eq!(RunId::default().as_ulid(), Ulid::nil());
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<RunId>(), size_of::<Ulid>());
        assert_eq!(size_of::<DomainId>(), size_of::<Ulid>());
    }
}
