//! The EC2 engine form: option lists and the layout tree.

use once_cell::sync::Lazy;

use super::{
    Collapsible, Container, ContainerOption, FieldSize, FormFieldSpec, FormLayout,
    LayoutDirection, Section, SelectOption, SelectorType,
};
use crate::domain::{AuthMode, Field};

/// Region value meaning "use the endpoint field instead of a known region".
pub const CUSTOM_ENDPOINT_REGION: &str = "$DREMIO_CUSTOM_ENDPOINT_URL$";

pub const AWS_REGION_OPTIONS: &[SelectOption] = &[
    SelectOption::new("US East (N. Virginia)", "us-east-1"),
    SelectOption::new("US West (N. California)", "us-west-1"),
    SelectOption::new("US West (Oregon)", "us-west-2"),
    SelectOption::new("EU (Ireland)", "eu-west-1"),
    SelectOption::new("Asia Pacific (Singapore)", "ap-southeast-1"),
];

pub const AWS_INSTANCE_TYPE_OPTIONS: &[SelectOption] = &[
    SelectOption::new("m5d.8xlarge (32c/128gb)", "m5d.8xlarge"),
    SelectOption::new("r5d.4xlarge (16c/128gb)", "r5d.4xlarge"),
    SelectOption::new("c5d.18xlarge (72c/144gb)", "c5d.18xlarge"),
    SelectOption::new("r5ad.4xlarge (16c/128gb)", "r5ad.4xlarge"),
    SelectOption::new("i3.4xlarge (16c/122gb)", "i3.4xlarge"),
];

const CREDENTIALS_ERR_MSG: &str = "Both access secret and key are required.";

static EC2_FORM_LAYOUT: Lazy<FormLayout> = Lazy::new(build_layout);

/// Layout of the EC2 engine form, built once.
pub fn ec2_form_layout() -> &'static FormLayout {
    &EC2_FORM_LAYOUT
}

fn region_field() -> FormFieldSpec {
    let mut options: Vec<ContainerOption> = AWS_REGION_OPTIONS
        .iter()
        .map(|region| ContainerOption::new(region.label, region.value, Container::empty()))
        .collect();
    options.push(ContainerOption::new(
        "Endpoint Override",
        CUSTOM_ENDPOINT_REGION,
        Container::field(FormFieldSpec::text(Field::Endpoint, "Endpoint")),
    ));

    FormFieldSpec::container_selection(Field::Region, "Region", options)
        .selector(SelectorType::Select)
        .tooltip("AWS Region to deploy engine")
        .size(FieldSize::Full)
}

fn auth_mode_field() -> FormFieldSpec {
    let credentials = Container::Group {
        layout: Some(LayoutDirection::Row),
        elements: vec![
            FormFieldSpec::text(Field::AccessKey, "Access Key")
                .size(FieldSize::Half)
                .err_msg(CREDENTIALS_ERR_MSG),
            FormFieldSpec::text(Field::SecretKey, "Secret")
                .size(FieldSize::Half)
                .secure()
                .err_msg(CREDENTIALS_ERR_MSG),
        ],
    };

    FormFieldSpec::container_selection(
        Field::AuthMode,
        "AWS Api Authentication Mode",
        vec![
            ContainerOption::new("Auto", AuthMode::Auto.as_str(), Container::empty()),
            ContainerOption::new("Key / Secret", AuthMode::Secret.as_str(), credentials),
        ],
    )
}

fn build_layout() -> FormLayout {
    let general = Section {
        name: " ",
        layout: Some(LayoutDirection::Row),
        collapsible: None,
        elements: vec![
            FormFieldSpec::text(Field::Name, "Name")
                .tooltip("Name of the engine")
                .size(FieldSize::Half),
            region_field(),
            FormFieldSpec::select(Field::InstanceType, "Instance Type", AWS_INSTANCE_TYPE_OPTIONS)
                .tooltip("AWS Instance type used to execution nodes")
                .size(FieldSize::Half),
            FormFieldSpec::number(Field::ContainerCount, "Instance Count")
                .tooltip("Number of execution nodes")
                .size(FieldSize::Half),
        ],
    };

    let access = Section {
        name: "",
        layout: None,
        collapsible: None,
        elements: vec![
            FormFieldSpec::text(Field::SshKeyName, "EC2 Key Pair Name")
                .size(FieldSize::Half)
                .tooltip("The AWS Key pair name used to log onto server instances"),
            FormFieldSpec::text(Field::SecurityGroupId, "Security Group ID")
                .size(FieldSize::Half)
                .tooltip("The Group ID of the Security group to use, e.g. “sg-0e7662f1d7a81abff”"),
            FormFieldSpec::text(Field::NodeIamInstanceProfile, "IAM Role for S3 Access")
                .size(FieldSize::Half)
                .tooltip("The IAM role used to access S3 buckets"),
        ],
    };

    let advanced = Section {
        name: "Advanced Properties",
        layout: None,
        collapsible: Some(Collapsible {
            init_collapsed: true,
        }),
        elements: vec![
            FormFieldSpec::checkbox(Field::UseClusterPlacementGroup, "Use Clustered Placement")
                .tooltip(
                    "Whether or not to use placement groups which locates instances close \
                     together inside an Availability Zone (optional)",
                ),
            FormFieldSpec::text(Field::Vpc, "VPC")
                .size(FieldSize::Half)
                .tooltip(
                    "The VPC ID of the Virtual Private Network to run in, \
                     e.g. vpc-04ee018cabe5a30ac (optional)",
                ),
            FormFieldSpec::text(Field::SubnetId, "Subnet ID")
                .size(FieldSize::Half)
                .tooltip(
                    "The Subnet ID within the VPN to run within, \
                     e.g. subnet-0b18cf53f02d3bf0e (optional)",
                ),
            FormFieldSpec::text(Field::AmiId, "AMI Identifier")
                .size(FieldSize::Half)
                .tooltip(
                    "The AMI used for execution and coordinator nodes, \
                     e.g. ami-00002c141987d373c (optional)",
                ),
            auth_mode_field(),
            FormFieldSpec::text(Field::AssumeRole, "IAM Role for API Operations")
                .tooltip("The IAM role used by Dremio to manage the engine (optional)"),
            FormFieldSpec::textarea(Field::ExtraConfProps, "Extra Dremio Configuration Properties")
                .tooltip("Additional Dremio configuration options (optional)"),
        ],
    };

    FormLayout {
        sections: vec![general, access, advanced],
    }
}
