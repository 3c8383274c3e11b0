//! Flat form values and the nested save payload built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::{ClusterType, Field};

/// Field values of one payload block, in field order.
pub type PropBag = BTreeMap<Field, Value>;

/// Flat field -> value mapping edited by the form.
///
/// A field that is not set has no entry. Keys that do not name a known
/// field are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct FormValues(BTreeMap<Field, Value>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field, value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builder-style insert, handy for seeding values.
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }
}

impl From<BTreeMap<String, Value>> for FormValues {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            match Field::from_prop_name(&key) {
                Some(field) => {
                    values.insert(field, value);
                }
                None => tracing::debug!("Ignoring unknown form value: {}", key),
            }
        }
        Self(values)
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// `awsProps` block of the save payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsPropsPayload {
    #[serde(flatten)]
    pub props: PropBag,
    pub connection_props: PropBag,
}

/// Body sent to the provisioning service when a cluster is saved.
///
/// The service still reads the dynamic-config and provider fields from the
/// top level of older payloads, so those are mirrored there in addition to
/// their nested copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub cluster_type: ClusterType,
    #[serde(flatten)]
    pub cluster: PropBag,
    #[serde(flatten)]
    pub mirrored: PropBag,
    pub dynamic_config: PropBag,
    /// Always `null` for EC2.
    pub yarn_props: Option<Value>,
    pub aws_props: AwsPropsPayload,
}

impl SavePayload {
    pub fn connection_props(&self) -> &PropBag {
        &self.aws_props.connection_props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_values_drop_unknown_keys() {
        let values: FormValues = serde_json::from_value(json!({
            "name": "engine",
            "region": "us-east-1",
            "somethingElse": 1
        }))
        .unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values.get(Field::Name), Some(&json!("engine")));
    }

    #[test]
    fn test_form_values_serialize_flat() {
        let values = FormValues::new()
            .with(Field::ContainerCount, 3)
            .with(Field::UseClusterPlacementGroup, false);

        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!({ "containerCount": 3, "useClusterPlacementGroup": false })
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = SavePayload {
            cluster_type: ClusterType::Ec2,
            cluster: [(Field::Name, json!("engine"))].into_iter().collect(),
            mirrored: [(Field::ContainerCount, json!(2))].into_iter().collect(),
            dynamic_config: [(Field::ContainerCount, json!(2))].into_iter().collect(),
            yarn_props: None,
            aws_props: AwsPropsPayload {
                props: [(Field::Vpc, json!("vpc-1"))].into_iter().collect(),
                connection_props: [(Field::Region, json!("us-east-1"))].into_iter().collect(),
            },
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "clusterType": "EC2",
                "name": "engine",
                "containerCount": 2,
                "dynamicConfig": { "containerCount": 2 },
                "yarnProps": null,
                "awsProps": {
                    "vpc": "vpc-1",
                    "connectionProps": { "region": "us-east-1" }
                }
            })
        );
    }
}
