use super::{FlowData, FlowDocument};
use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A flow document together with the id it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFlow {
    pub id: Uuid,
    #[serde(flatten)]
    pub flow: FlowDocument,
}

/// A partial update. Only the members that are set replace stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub data: Option<FlowData>,
}

/// An in-memory collection of flow documents, kept in creation order.
#[derive(Debug, Default)]
pub struct FlowStore {
    flows: Vec<StoredFlow>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new flow under a fresh id.
    pub fn create(&mut self, flow: FlowDocument) -> &StoredFlow {
        let id = Uuid::new_v4();
        log::info!("Storing flow '{}' as {}", flow.name, id);
        self.flows.push(StoredFlow { id, flow });
        &self.flows[self.flows.len() - 1]
    }

    /// Stores several flows at once and returns their stored form.
    pub fn create_batch(&mut self, flows: Vec<FlowDocument>) -> Vec<StoredFlow> {
        flows
            .into_iter()
            .map(|flow| self.create(flow).clone())
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Result<&StoredFlow, FlowError> {
        self.flows
            .iter()
            .find(|f| f.id == id)
            .ok_or(FlowError::UnknownFlow(id))
    }

    pub fn list(&self) -> &[StoredFlow] {
        &self.flows
    }

    pub fn update(&mut self, id: Uuid, update: FlowUpdate) -> Result<&StoredFlow, FlowError> {
        let stored = self
            .flows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(FlowError::UnknownFlow(id))?;
        if let Some(name) = update.name {
            stored.flow.name = name;
        }
        if let Some(description) = update.description {
            stored.flow.description = description;
        }
        if let Some(data) = update.data {
            stored.flow.data = data;
        }
        log::debug!("Updated flow {}", id);
        Ok(stored)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), FlowError> {
        let index = self
            .flows
            .iter()
            .position(|f| f.id == id)
            .ok_or(FlowError::UnknownFlow(id))?;
        self.flows.remove(index);
        log::info!("Deleted flow {}", id);
        Ok(())
    }

    /// Imports flows from JSON text.
    ///
    /// Accepts either `{"flows": [...]}` or a bare array of flow documents.
    /// Incoming `id` keys are discarded; every imported flow gets a fresh id.
    pub fn upload(&mut self, json: &str) -> Result<Vec<StoredFlow>, FlowError> {
        let value: Value = serde_json::from_str(json)?;
        let entries: Vec<Value> = match value {
            Value::Object(mut obj) if obj.contains_key("flows") => {
                let flows = obj.remove("flows").unwrap_or(Value::Null);
                serde_json::from_value(flows)?
            }
            other => serde_json::from_value(other)?,
        };
        let flows = entries
            .into_iter()
            .map(|mut entry| {
                if let Value::Object(obj) = &mut entry {
                    obj.remove("id");
                }
                serde_json::from_value(entry)
            })
            .collect::<Result<Vec<FlowDocument>, _>>()?;
        Ok(self.create_batch(flows))
    }

    /// Exports every stored flow as one JSON array.
    pub fn download(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string(&self.flows)?)
    }
}
