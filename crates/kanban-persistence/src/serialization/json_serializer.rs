use crate::traits::Serializer;
use kanban_core::{KanbanError, KanbanResult};

/// JSON serializer for persisted records
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Single-line output, the format records are stored in.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> KanbanResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        json.map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    fn deserialize(&self, text: &str) -> KanbanResult<T> {
        serde_json::from_str(text).map_err(|e| KanbanError::Serialization(e.to_string()))
    }
}
