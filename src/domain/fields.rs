//! Form field identifiers and their grouping by origin.
//!
//! Every editable value of an EC2 provisioning record is addressed by a
//! [`Field`]. Fields are grouped by where they live in the persisted record:
//! top level, `dynamicConfig`, `awsProps` or `awsProps.connectionProps`.
//! The groups are disjoint and together cover every field.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A form field, serialized under its wire name (`nodeIamInstanceProfile`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Cluster
    Name,

    // Dynamic config
    ContainerCount,

    // AWS props
    Vpc,
    NodeIamInstanceProfile,
    AmiId,
    SshKeyName,
    SecurityGroupId,
    SubnetId,
    InstanceType,
    ExtraConfProps,
    UseClusterPlacementGroup,

    // Connection props
    AuthMode,
    AccessKey,
    SecretKey,
    Region,
    Endpoint,
    AssumeRole,
}

/// Where a field lives in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Cluster,
    DynamicConfig,
    AwsProps,
    ConnectionProps,
}

pub const EC2_CLUSTER_FIELDS: &[Field] = &[Field::Name];

pub const EC2_DYNAMIC_CONFIG_FIELDS: &[Field] = &[Field::ContainerCount];

pub const EC2_AWS_PROPS: &[Field] = &[
    Field::Vpc,
    Field::NodeIamInstanceProfile,
    Field::AmiId,
    Field::SshKeyName,
    Field::SecurityGroupId,
    Field::SubnetId,
    Field::InstanceType,
    Field::ExtraConfProps,
    Field::UseClusterPlacementGroup,
];

pub const EC2_AWS_CONNECTION_PROPS: &[Field] = &[
    Field::AuthMode,
    Field::AccessKey,
    Field::SecretKey,
    Field::Region,
    Field::Endpoint,
    Field::AssumeRole,
];

/// All fields, group by group.
pub const EC2_FIELDS: &[Field] = &[
    Field::Name,
    Field::ContainerCount,
    Field::Vpc,
    Field::NodeIamInstanceProfile,
    Field::AmiId,
    Field::SshKeyName,
    Field::SecurityGroupId,
    Field::SubnetId,
    Field::InstanceType,
    Field::ExtraConfProps,
    Field::UseClusterPlacementGroup,
    Field::AuthMode,
    Field::AccessKey,
    Field::SecretKey,
    Field::Region,
    Field::Endpoint,
    Field::AssumeRole,
];

static EC2_FIELDS_MAP: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    EC2_FIELDS
        .iter()
        .map(|field| (field.as_str(), field.as_str()))
        .collect()
});

/// Wire name -> wire name, for existence checks by name.
pub fn ec2_fields_map() -> &'static BTreeMap<&'static str, &'static str> {
    &EC2_FIELDS_MAP
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::ContainerCount => "containerCount",
            Field::Vpc => "vpc",
            Field::NodeIamInstanceProfile => "nodeIamInstanceProfile",
            Field::AmiId => "amiId",
            Field::SshKeyName => "sshKeyName",
            Field::SecurityGroupId => "securityGroupId",
            Field::SubnetId => "subnetId",
            Field::InstanceType => "instanceType",
            Field::ExtraConfProps => "extraConfProps",
            Field::UseClusterPlacementGroup => "useClusterPlacementGroup",
            Field::AuthMode => "authMode",
            Field::AccessKey => "accessKey",
            Field::SecretKey => "secretKey",
            Field::Region => "region",
            Field::Endpoint => "endpoint",
            Field::AssumeRole => "assumeRole",
        }
    }

    pub fn group(&self) -> FieldGroup {
        match self {
            Field::Name => FieldGroup::Cluster,
            Field::ContainerCount => FieldGroup::DynamicConfig,
            Field::Vpc
            | Field::NodeIamInstanceProfile
            | Field::AmiId
            | Field::SshKeyName
            | Field::SecurityGroupId
            | Field::SubnetId
            | Field::InstanceType
            | Field::ExtraConfProps
            | Field::UseClusterPlacementGroup => FieldGroup::AwsProps,
            Field::AuthMode
            | Field::AccessKey
            | Field::SecretKey
            | Field::Region
            | Field::Endpoint
            | Field::AssumeRole => FieldGroup::ConnectionProps,
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn from_prop_name(name: &str) -> Option<Field> {
        EC2_FIELDS.iter().copied().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_prop_name(s).ok_or_else(|| format!("Unknown field: {}", s))
    }
}

impl FieldGroup {
    /// Groups in mapping order.
    pub const ALL: [FieldGroup; 4] = [
        FieldGroup::Cluster,
        FieldGroup::DynamicConfig,
        FieldGroup::AwsProps,
        FieldGroup::ConnectionProps,
    ];

    pub fn fields(&self) -> &'static [Field] {
        match self {
            FieldGroup::Cluster => EC2_CLUSTER_FIELDS,
            FieldGroup::DynamicConfig => EC2_DYNAMIC_CONFIG_FIELDS,
            FieldGroup::AwsProps => EC2_AWS_PROPS,
            FieldGroup::ConnectionProps => EC2_AWS_CONNECTION_PROPS,
        }
    }

    /// Record path of the group, e.g. `awsProps.connectionProps`.
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            FieldGroup::Cluster => &[],
            FieldGroup::DynamicConfig => &["dynamicConfig"],
            FieldGroup::AwsProps => &["awsProps"],
            FieldGroup::ConnectionProps => &["awsProps", "connectionProps"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_groups_are_disjoint_and_cover_all_fields() {
        let mut seen = HashSet::new();
        for group in FieldGroup::ALL {
            for field in group.fields() {
                assert!(seen.insert(*field), "{} appears in two groups", field);
                assert_eq!(field.group(), group);
            }
        }
        assert_eq!(seen.len(), EC2_FIELDS.len());
    }

    #[test]
    fn test_ec2_fields_follow_group_order() {
        let concatenated: Vec<Field> = FieldGroup::ALL
            .iter()
            .flat_map(|group| group.fields().iter().copied())
            .collect();
        assert_eq!(concatenated, EC2_FIELDS);
    }

    #[test]
    fn test_wire_names_match_serde() {
        for field in EC2_FIELDS {
            let encoded = serde_json::to_value(field).unwrap();
            assert_eq!(encoded, serde_json::json!(field.as_str()));
            assert_eq!(Field::from_prop_name(field.as_str()), Some(*field));
        }
    }

    #[test]
    fn test_fields_map() {
        let map = ec2_fields_map();
        assert_eq!(map.len(), 17);
        assert_eq!(map.get("secretKey"), Some(&"secretKey"));
        assert!(map.get("yarnProps").is_none());
    }

    #[test]
    fn test_parse_unknown_field() {
        assert!("clusterType".parse::<Field>().is_err());
        assert_eq!("amiId".parse::<Field>(), Ok(Field::AmiId));
    }
}
