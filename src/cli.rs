use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::adapters::{self, ProvisioningError};
use crate::config::{OutputFormat, Settings};
use crate::domain::{Field, FieldGroup, FormValues, ProvisioningRecord};
use crate::schema::{
    ec2_form_layout, LayoutValidator, SelectOption, AWS_INSTANCE_TYPE_OPTIONS, AWS_REGION_OPTIONS,
};

/// Form schema and value mapping for EC2 engine provisioning
#[derive(Parser, Debug, Clone)]
#[command(name = "provisioning-form", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "PROVISIONING_CONFIG", default_value = "provisioning.toml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, env = "PROVISIONING_FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the EC2 form layout
    Layout,
    /// Print a dropdown option list
    Options {
        #[arg(value_enum)]
        list: OptionList,
    },
    /// Print field names grouped by where they live in the record
    Fields,
    /// Convert a provisioning record file into initial form values
    InitValues { record: PathBuf },
    /// Convert a form values file into a save payload
    SavePayload { values: PathBuf },
    /// Tell whether saving would restart the cluster
    RestartCheck {
        record: PathBuf,
        /// The form has unsaved changes
        #[arg(long)]
        dirty: bool,
    },
    /// Resolve an instance-type label to its machine type
    InstanceType { label: String },
    /// Check that the layout and the field groups agree
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionList {
    Regions,
    InstanceTypes,
}

#[derive(Serialize)]
struct GroupListing {
    group: FieldGroup,
    path: String,
    fields: &'static [Field],
}

/// Execute a command and return what should be printed.
pub fn run(command: &Command, settings: &Settings) -> Result<String, ProvisioningError> {
    let output = &settings.output;
    match command {
        Command::Layout => adapters::render(ec2_form_layout(), output),
        Command::Options { list } => {
            let options: &[SelectOption] = match list {
                OptionList::Regions => AWS_REGION_OPTIONS,
                OptionList::InstanceTypes => AWS_INSTANCE_TYPE_OPTIONS,
            };
            adapters::render(options, output)
        }
        Command::Fields => {
            let groups: Vec<GroupListing> = FieldGroup::ALL
                .iter()
                .map(|group| GroupListing {
                    group: *group,
                    path: group.path().join("."),
                    fields: group.fields(),
                })
                .collect();
            adapters::render(&groups, output)
        }
        Command::InitValues { record } => {
            let record: ProvisioningRecord = adapters::load_document(record)?;
            let values = adapters::get_init_values_from_provision(&record, FormValues::new());
            adapters::render(&values, output)
        }
        Command::SavePayload { values } => {
            let values: FormValues = adapters::load_document(values)?;
            let payload = adapters::prepare_provision_values_for_save(&values);
            adapters::render(&payload, output)
        }
        Command::RestartCheck { record, dirty } => {
            let record: ProvisioningRecord = adapters::load_document(record)?;
            Ok(adapters::is_restart_required(Some(&record), *dirty).to_string())
        }
        Command::InstanceType { label } => Ok(adapters::get_instance_type_value(label).to_string()),
        Command::Validate => {
            LayoutValidator::validate(ec2_form_layout()).map_err(ProvisioningError::InvalidLayout)?;
            Ok("Layout is valid".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["provisioning-form", "layout"]);
        assert_eq!(cli.config, PathBuf::from("provisioning.toml"));
        assert!(cli.format.is_none());
        assert!(!cli.compact);
        assert_eq!(cli.command, Command::Layout);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "provisioning-form",
            "--config",
            "custom.toml",
            "--format",
            "yaml",
            "restart-check",
            "record.json",
            "--dirty",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.format, Some(OutputFormat::Yaml));
        assert_eq!(
            cli.command,
            Command::RestartCheck {
                record: PathBuf::from("record.json"),
                dirty: true
            }
        );
    }

    #[test]
    fn test_options_subcommand() {
        let cli = Cli::parse_from(["provisioning-form", "options", "instance-types"]);
        assert_eq!(
            cli.command,
            Command::Options {
                list: OptionList::InstanceTypes
            }
        );
    }

    #[test]
    fn test_run_instance_type() {
        let command = Command::InstanceType {
            label: "r5d.4xlarge (16c/128gb)".to_string(),
        };
        assert_eq!(run(&command, &Settings::default()).unwrap(), "r5d.4xlarge");
    }

    #[test]
    fn test_run_validate() {
        assert_eq!(
            run(&Command::Validate, &Settings::default()).unwrap(),
            "Layout is valid"
        );
    }

    #[test]
    fn test_run_fields() {
        let output = run(&Command::Fields, &Settings::default()).unwrap();
        let listing: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(listing[3]["group"], "connection_props");
        assert_eq!(listing[3]["path"], "awsProps.connectionProps");
        assert_eq!(listing[0]["fields"], serde_json::json!(["name"]));
    }
}
