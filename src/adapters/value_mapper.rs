//! Conversion between provisioning records, form values and save payloads.
//!
//! The read path flattens a persisted record into [`FormValues`]; the write
//! path rebuilds the nested [`SavePayload`] the provisioning service expects.
//! Nothing here fails: absent values are skipped and unknown labels fall back
//! to themselves.

use serde_json::Value;

use crate::domain::fields::{
    EC2_AWS_CONNECTION_PROPS, EC2_AWS_PROPS, EC2_CLUSTER_FIELDS, EC2_DYNAMIC_CONFIG_FIELDS,
};
use crate::domain::{
    AuthMode, AwsPropsPayload, ClusterState, ClusterType, Field, FieldGroup, FormValues, PropBag,
    ProvisioningRecord, SavePayload,
};
use crate::schema::{AWS_INSTANCE_TYPE_OPTIONS, CUSTOM_ENDPOINT_REGION};

/// Whether the form edits an existing cluster rather than creating one.
pub fn is_edit_mode(record: Option<&ProvisioningRecord>) -> bool {
    record.is_some_and(|record| !record.is_empty())
}

/// Whether saving would restart a running cluster.
pub fn is_restart_required(record: Option<&ProvisioningRecord>, is_dirty: bool) -> bool {
    let is_running = record.and_then(ProvisioningRecord::state) == Some(ClusterState::Running);
    is_edit_mode(record) && is_running && is_dirty
}

/// Machine type for an instance-type label, or the label itself when it is
/// not one of the known labels.
pub fn get_instance_type_value(label: &str) -> &str {
    AWS_INSTANCE_TYPE_OPTIONS
        .iter()
        .find(|option| option.label == label)
        .map(|option| option.value)
        .unwrap_or(label)
}

/// Copy `fields` from `values` into `accumulator`. Unset fields stay unset.
pub fn add_props_for_save(mut accumulator: PropBag, fields: &[Field], values: &FormValues) -> PropBag {
    for field in fields {
        if let Some(value) = values.get(*field) {
            accumulator.insert(*field, value.clone());
        }
    }
    accumulator
}

/// Initial form values for editing `record`, merged into `init_values`.
///
/// Fields the record does not carry are left out of the result entirely.
pub fn get_init_values_from_provision(
    record: &ProvisioningRecord,
    mut init_values: FormValues,
) -> FormValues {
    for group in FieldGroup::ALL {
        for field in group.fields() {
            if let Some(value) = record.get(*field) {
                init_values.insert(*field, value);
            }
        }
    }
    tracing::debug!("Prepared {} initial form values", init_values.len());
    init_values
}

/// Build the save payload for the provisioning service from form values.
pub fn prepare_provision_values_for_save(values: &FormValues) -> SavePayload {
    let mirrored = add_props_for_save(PropBag::new(), EC2_DYNAMIC_CONFIG_FIELDS, values);
    let mut payload = SavePayload {
        cluster_type: ClusterType::Ec2,
        cluster: add_props_for_save(PropBag::new(), EC2_CLUSTER_FIELDS, values),
        mirrored: add_props_for_save(mirrored, EC2_AWS_PROPS, values),
        dynamic_config: add_props_for_save(PropBag::new(), EC2_DYNAMIC_CONFIG_FIELDS, values),
        yarn_props: None,
        aws_props: AwsPropsPayload {
            props: add_props_for_save(PropBag::new(), EC2_AWS_PROPS, values),
            connection_props: add_props_for_save(PropBag::new(), EC2_AWS_CONNECTION_PROPS, values),
        },
    };

    prune_connection_props(&mut payload.aws_props.connection_props);
    payload
}

/// Drop connection fields that belong to an unselected region or auth mode.
fn prune_connection_props(connection: &mut PropBag) {
    let region = connection.get(&Field::Region).and_then(Value::as_str);
    if region != Some(CUSTOM_ENDPOINT_REGION) && connection.remove(&Field::Endpoint).is_some() {
        tracing::debug!("Dropped endpoint for non-custom region");
    }

    let auth_mode = connection.get(&Field::AuthMode).and_then(Value::as_str);
    if auth_mode == Some(AuthMode::Auto.as_str()) {
        connection.remove(&Field::AccessKey);
        connection.remove(&Field::SecretKey);
    }
}
