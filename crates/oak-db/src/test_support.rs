//! Shared test utilities for oak-db unit tests.

pub(crate) mod helpers {
    use oak_config::GeneralConfig;
    use oak_core::entities::{Entry, Source, SourceRecord};

    use crate::OakDb;
    use crate::service::OakService;

    /// In-memory service with default limits.
    pub async fn test_service() -> OakService {
        let db = OakDb::open_local(":memory:").await.unwrap();
        OakService::from_db(db, GeneralConfig::default())
    }

    pub fn species(name: &str) -> Entry {
        Entry::new(name)
    }

    pub fn hybrid(name: &str, parent1: Option<&str>, parent2: Option<&str>) -> Entry {
        Entry {
            is_hybrid: true,
            parent1: parent1.map(String::from),
            parent2: parent2.map(String::from),
            ..Entry::new(name)
        }
    }

    pub fn source(name: &str) -> Source {
        Source {
            source_type: "website".into(),
            name: name.into(),
            ..Source::default()
        }
    }

    pub fn record(name: &str, source_id: i64) -> SourceRecord {
        SourceRecord {
            scientific_name: name.into(),
            source_id,
            ..SourceRecord::default()
        }
    }
}
