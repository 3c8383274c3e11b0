use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub mod fields;
pub mod payload;

pub use fields::{Field, FieldGroup};
pub use payload::{AwsPropsPayload, FormValues, PropBag, SavePayload};

/// Lifecycle state of a provisioned cluster, as reported by the service.
///
/// States this crate does not know about (`FAILED`, future additions)
/// deserialize as [`ClusterState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterState {
    Running,
    Stopped,
    Starting,
    Stopping,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl ClusterState {
    pub const ALL: [ClusterState; 5] = [
        ClusterState::Running,
        ClusterState::Stopped,
        ClusterState::Starting,
        ClusterState::Stopping,
        ClusterState::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterState::Running => "RUNNING",
            ClusterState::Stopped => "STOPPED",
            ClusterState::Starting => "STARTING",
            ClusterState::Stopping => "STOPPING",
            ClusterState::Deleted => "DELETED",
            ClusterState::Unknown => "UNKNOWN",
        }
    }
}

/// Provisioning backend. Only EC2 is produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterType {
    #[serde(rename = "EC2")]
    Ec2,
}

/// How the service authenticates against the AWS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMode {
    /// Instance profile / default credential chain
    Auto,
    /// Explicit access key and secret
    Secret,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Auto => "AUTO",
            AuthMode::Secret => "SECRET",
        }
    }
}

/// Keep a key that is present in the record, even when it holds `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Nested objects never fail the record: `null` or a value of the wrong
/// shape becomes an empty object.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Some(T::default()));
    }
    match serde_json::from_value(value) {
        Ok(nested) => Ok(Some(nested)),
        Err(err) => {
            warn!("Ignoring malformed record attribute: {}", err);
            Ok(Some(T::default()))
        }
    }
}

/// Sizing values that can change without redeploying infrastructure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicConfig {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub container_count: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Credentials, region and endpoint used to reach the AWS API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProps {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub access_key: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub assume_role: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// EC2 provider properties of a provisioned cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsProps {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub node_iam_instance_profile: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ami_id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ssh_key_name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub security_group_id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub extra_conf_props: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub use_cluster_placement_group: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub connection_props: Option<ConnectionProps>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A persisted provisioning record as returned by the provisioning service.
///
/// The record is laid out along the form's field groups, but values are kept
/// exactly as persisted: a mistyped `containerCount` is carried through to the
/// form rather than rejecting the record. Everything else the service sends
/// (`id`, `tag`, `desiredState`, ...) is kept in `other`, at every level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_state: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dynamic_config: Option<DynamicConfig>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub aws_props: Option<AwsProps>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ProvisioningRecord {
    /// Number of persisted top-level attributes.
    ///
    /// Keys that are present with a `null` value count as attributes.
    pub fn len(&self) -> usize {
        let typed = [
            self.name.is_some(),
            self.current_state.is_some(),
            self.dynamic_config.is_some(),
            self.aws_props.is_some(),
        ];
        typed.iter().filter(|set| **set).count() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lifecycle state, if the record carries one as a string.
    pub fn state(&self) -> Option<ClusterState> {
        serde_json::from_value(self.current_state.clone()?).ok()
    }

    fn connection_props(&self) -> Option<&ConnectionProps> {
        self.aws_props.as_ref()?.connection_props.as_ref()
    }

    /// Look up the value behind a form field, following the field's group path:
    /// top level, `dynamicConfig`, `awsProps` or `awsProps.connectionProps`.
    ///
    /// Returns `None` when any segment of the path is absent.
    pub fn get(&self, field: Field) -> Option<Value> {
        let aws = self.aws_props.as_ref();
        let conn = self.connection_props();
        let value = match field {
            Field::Name => self.name.as_ref(),
            Field::ContainerCount => self.dynamic_config.as_ref()?.container_count.as_ref(),
            Field::Vpc => aws?.vpc.as_ref(),
            Field::NodeIamInstanceProfile => aws?.node_iam_instance_profile.as_ref(),
            Field::AmiId => aws?.ami_id.as_ref(),
            Field::SshKeyName => aws?.ssh_key_name.as_ref(),
            Field::SecurityGroupId => aws?.security_group_id.as_ref(),
            Field::SubnetId => aws?.subnet_id.as_ref(),
            Field::InstanceType => aws?.instance_type.as_ref(),
            Field::ExtraConfProps => aws?.extra_conf_props.as_ref(),
            Field::UseClusterPlacementGroup => aws?.use_cluster_placement_group.as_ref(),
            Field::AuthMode => conn?.auth_mode.as_ref(),
            Field::AccessKey => conn?.access_key.as_ref(),
            Field::SecretKey => conn?.secret_key.as_ref(),
            Field::Region => conn?.region.as_ref(),
            Field::Endpoint => conn?.endpoint.as_ref(),
            Field::AssumeRole => conn?.assume_role.as_ref(),
        };
        value.cloned()
    }
}
