use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::domain::fields::EC2_FIELDS;
use crate::domain::Field;
use crate::schema::{FieldKind, FormFieldSpec, FormLayout};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Field has no form element: {0}")]
    MissingField(Field),

    #[error("Field appears {count} times in the layout: {field}")]
    Duplicate { field: Field, count: usize },

    #[error("Choice field {field} is nested inside a container of {parent}")]
    NestingTooDeep { field: Field, parent: Field },

    #[error("Option value '{value}' is repeated on {field}")]
    DuplicateOption { field: Field, value: &'static str },

    #[error("Choice field has no options: {0}")]
    NoOptions(Field),
}

pub struct LayoutValidator;

impl LayoutValidator {
    pub fn validate(layout: &FormLayout) -> Result<(), Vec<LayoutError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_coverage(layout) {
            errors.extend(e);
        }

        for section in &layout.sections {
            for spec in &section.elements {
                if let Err(e) = Self::validate_options(spec) {
                    errors.extend(e);
                }
                if let Err(e) = Self::validate_containers(spec) {
                    errors.extend(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_coverage(layout: &FormLayout) -> Result<(), Vec<LayoutError>> {
        let mut errors = Vec::new();
        let mut counts: HashMap<Field, usize> = HashMap::new();

        for placed in layout.fields() {
            *counts.entry(placed.spec.prop_name).or_default() += 1;
        }

        for field in EC2_FIELDS {
            match counts.get(field).copied().unwrap_or(0) {
                0 => errors.push(LayoutError::MissingField(*field)),
                1 => {}
                count => errors.push(LayoutError::Duplicate {
                    field: *field,
                    count,
                }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_options(spec: &FormFieldSpec) -> Result<(), Vec<LayoutError>> {
        let mut errors = Vec::new();

        let is_choice = matches!(
            spec.kind,
            FieldKind::Select { .. } | FieldKind::ContainerSelection { .. }
        );
        let values = spec.kind.option_values();

        if is_choice && values.is_empty() {
            errors.push(LayoutError::NoOptions(spec.prop_name));
        }

        let mut seen = HashSet::new();
        for value in values {
            if !seen.insert(value) {
                errors.push(LayoutError::DuplicateOption {
                    field: spec.prop_name,
                    value,
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_containers(spec: &FormFieldSpec) -> Result<(), Vec<LayoutError>> {
        let mut errors = Vec::new();

        for option in spec.container_options().unwrap_or_default() {
            for nested in option.container.elements() {
                // Containers hold plain fields only
                if matches!(nested.kind, FieldKind::ContainerSelection { .. }) {
                    errors.push(LayoutError::NestingTooDeep {
                        field: nested.prop_name,
                        parent: spec.prop_name,
                    });
                }
                if let Err(e) = Self::validate_options(nested) {
                    errors.extend(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ec2_form_layout, Container, ContainerOption, Section};

    fn layout_with(elements: Vec<FormFieldSpec>) -> FormLayout {
        let mut layout = ec2_form_layout().clone();
        layout.sections.push(Section {
            name: "extra",
            layout: None,
            collapsible: None,
            elements,
        });
        layout
    }

    #[test]
    fn test_ec2_layout_is_valid() {
        assert_eq!(LayoutValidator::validate(ec2_form_layout()), Ok(()));
    }

    #[test]
    fn test_missing_field() {
        let mut layout = ec2_form_layout().clone();
        layout.sections.pop();

        let errors = LayoutValidator::validate(&layout).unwrap_err();
        assert!(errors.contains(&LayoutError::MissingField(Field::AuthMode)));
        assert!(errors.contains(&LayoutError::MissingField(Field::SecretKey)));
        assert!(errors.contains(&LayoutError::MissingField(Field::ExtraConfProps)));
    }

    #[test]
    fn test_duplicate_field() {
        let layout = layout_with(vec![FormFieldSpec::text(Field::Name, "Name again")]);

        let errors = LayoutValidator::validate(&layout).unwrap_err();
        assert_eq!(
            errors,
            vec![LayoutError::Duplicate {
                field: Field::Name,
                count: 2
            }]
        );
    }

    #[test]
    fn test_nested_choice_is_rejected() {
        let mut layout = ec2_form_layout().clone();
        let region = layout.sections[0]
            .elements
            .iter_mut()
            .find(|spec| spec.prop_name == Field::Region)
            .unwrap();
        region.kind = FieldKind::ContainerSelection {
            selector_type: None,
            options: vec![ContainerOption::new(
                "Custom",
                "custom",
                Container::field(FormFieldSpec::container_selection(
                    Field::Endpoint,
                    "Endpoint",
                    vec![ContainerOption::new("A", "a", Container::empty())],
                )),
            )],
        };

        let errors = LayoutValidator::validate(&layout).unwrap_err();
        assert_eq!(
            errors,
            vec![LayoutError::NestingTooDeep {
                field: Field::Endpoint,
                parent: Field::Region
            }]
        );
    }

    #[test]
    fn test_duplicate_option_and_empty_select() {
        let mut layout = ec2_form_layout().clone();
        for spec in layout.sections[0].elements.iter_mut() {
            if spec.prop_name == Field::InstanceType {
                spec.kind = FieldKind::Select { options: vec![] };
            }
        }
        let auth = layout.sections[2]
            .elements
            .iter_mut()
            .find(|spec| spec.prop_name == Field::AuthMode)
            .unwrap();
        if let FieldKind::ContainerSelection { options, .. } = &mut auth.kind {
            options.push(ContainerOption::new("Auto again", "AUTO", Container::empty()));
        }

        let errors = LayoutValidator::validate(&layout).unwrap_err();
        assert!(errors.contains(&LayoutError::NoOptions(Field::InstanceType)));
        assert!(errors.contains(&LayoutError::DuplicateOption {
            field: Field::AuthMode,
            value: "AUTO"
        }));
    }

    #[test]
    fn test_error_messages() {
        let error = LayoutError::MissingField(Field::AmiId);
        assert_eq!(error.to_string(), "Field has no form element: amiId");
    }
}
