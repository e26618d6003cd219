use serde::{Deserialize, Deserializer, Serializer};
use std::sync::Arc;

pub mod serde_arc_str {
    use super::*;

    pub fn serialize<S>(arc: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(arc)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(s.as_str()))
    }
}

pub mod serde_opt_arc_str {
    use super::*;

    pub fn serialize<S>(arc: &Option<Arc<str>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match arc {
            Some(s) => serializer.serialize_some(s.as_ref()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Arc<str>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| Arc::from(s.as_str())))
    }
}

/// A symbol table travels as a plain list of `SymbolInformation` records and is
/// keyed by each record's raw symbol on the way back in. A repeated symbol keeps
/// its first position and the last record.
pub mod symbol_table {
    use crate::models::SymbolInformation;
    use indexmap::IndexMap;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        table: &IndexMap<String, SymbolInformation>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(table.len()))?;
        for info in table.values() {
            seq.serialize_element(info)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<String, SymbolInformation>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let infos = Vec::<SymbolInformation>::deserialize(deserializer)?;
        let mut table = IndexMap::with_capacity(infos.len());
        for info in infos {
            table.insert(info.symbol.clone(), info);
        }
        Ok(table)
    }
}
