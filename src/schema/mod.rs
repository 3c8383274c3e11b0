//! Declarative form layout
//!
//! Describes how the provisioning form is rendered: sections, fields, field
//! kinds and conditional containers. The layout is pure data; an external
//! renderer walks it together with [`FormValues`].
//!
//! A `container_selection` field carries one [`Container`] per option. Only
//! the container of the currently selected option is part of the active form
//! state, and containers never nest further.

use serde::{Serialize, Serializer};

use crate::domain::{Field, FormValues};

pub mod ec2;
pub mod validator;

pub use ec2::{
    ec2_form_layout, AWS_INSTANCE_TYPE_OPTIONS, AWS_REGION_OPTIONS, CUSTOM_ENDPOINT_REGION,
};
pub use validator::{LayoutError, LayoutValidator};

// ============================================================================
// Options
// ============================================================================

/// Entry of a dropdown list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl SelectOption {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// Option of a `container_selection` field, revealing `container` when selected
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContainerOption {
    pub label: &'static str,
    pub value: &'static str,
    pub container: Container,
}

impl ContainerOption {
    pub fn new(label: &'static str, value: &'static str, container: Container) -> Self {
        Self {
            label,
            value,
            container,
        }
    }
}

/// Nested layout fragment attached to an option
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Container {
    /// Selecting the option reveals nothing
    Empty {},
    /// A single field
    Field(Box<FormFieldSpec>),
    /// Several fields laid out together
    Group {
        #[serde(skip_serializing_if = "Option::is_none")]
        layout: Option<LayoutDirection>,
        elements: Vec<FormFieldSpec>,
    },
}

impl Container {
    pub fn empty() -> Self {
        Container::Empty {}
    }

    pub fn field(spec: FormFieldSpec) -> Self {
        Container::Field(Box::new(spec))
    }

    /// Fields revealed by this container
    pub fn elements(&self) -> &[FormFieldSpec] {
        match self {
            Container::Empty {} => &[],
            Container::Field(spec) => std::slice::from_ref(spec.as_ref()),
            Container::Group { elements, .. } => elements,
        }
    }
}

// ============================================================================
// Fields
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSize {
    Half,
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    Row,
}

/// Widget used to pick the option of a `container_selection` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Select,
}

/// Kind of a renderable field, with kind-specific data
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    Textarea,
    Select {
        options: Vec<SelectOption>,
    },
    /// Single choice whose options may reveal nested fields
    ContainerSelection {
        #[serde(rename = "selectorType", skip_serializing_if = "Option::is_none")]
        selector_type: Option<SelectorType>,
        options: Vec<ContainerOption>,
    },
}

impl FieldKind {
    /// Option values of a choice field, empty for other kinds
    pub fn option_values(&self) -> Vec<&'static str> {
        match self {
            FieldKind::Select { options } => options.iter().map(|o| o.value).collect(),
            FieldKind::ContainerSelection { options, .. } => {
                options.iter().map(|o| o.value).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// One renderable field
#[derive(Clone, Debug, PartialEq)]
pub struct FormFieldSpec {
    pub kind: FieldKind,
    pub prop_name: Field,
    pub label: &'static str,
    pub tooltip: Option<&'static str>,
    pub size: Option<FieldSize>,
    /// Mask the input
    pub secure: bool,
    pub err_msg: Option<&'static str>,
}

/// Serialized shape of a [`FormFieldSpec`]. Renderers look the field name up
/// under either `propName` or `propertyName`, so both are written.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldSpecWire<'a> {
    #[serde(flatten)]
    kind: &'a FieldKind,
    prop_name: Field,
    property_name: Field,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<FieldSize>,
    #[serde(skip_serializing_if = "is_false")]
    secure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    err_msg: Option<&'static str>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Serialize for FormFieldSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FieldSpecWire {
            kind: &self.kind,
            prop_name: self.prop_name,
            property_name: self.prop_name,
            label: self.label,
            tooltip: self.tooltip,
            size: self.size,
            secure: self.secure,
            err_msg: self.err_msg,
        }
        .serialize(serializer)
    }
}

impl FormFieldSpec {
    pub fn new(kind: FieldKind, prop_name: Field, label: &'static str) -> Self {
        Self {
            kind,
            prop_name,
            label,
            tooltip: None,
            size: None,
            secure: false,
            err_msg: None,
        }
    }

    pub fn text(prop_name: Field, label: &'static str) -> Self {
        Self::new(FieldKind::Text, prop_name, label)
    }

    pub fn number(prop_name: Field, label: &'static str) -> Self {
        Self::new(FieldKind::Number, prop_name, label)
    }

    pub fn checkbox(prop_name: Field, label: &'static str) -> Self {
        Self::new(FieldKind::Checkbox, prop_name, label)
    }

    pub fn textarea(prop_name: Field, label: &'static str) -> Self {
        Self::new(FieldKind::Textarea, prop_name, label)
    }

    pub fn select(prop_name: Field, label: &'static str, options: &[SelectOption]) -> Self {
        Self::new(
            FieldKind::Select {
                options: options.to_vec(),
            },
            prop_name,
            label,
        )
    }

    pub fn container_selection(
        prop_name: Field,
        label: &'static str,
        options: Vec<ContainerOption>,
    ) -> Self {
        Self::new(
            FieldKind::ContainerSelection {
                selector_type: None,
                options,
            },
            prop_name,
            label,
        )
    }

    pub fn tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn size(mut self, size: FieldSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn err_msg(mut self, err_msg: &'static str) -> Self {
        self.err_msg = Some(err_msg);
        self
    }

    /// Render the option picker of a `container_selection` with the given widget
    pub fn selector(mut self, selector: SelectorType) -> Self {
        if let FieldKind::ContainerSelection { selector_type, .. } = &mut self.kind {
            *selector_type = Some(selector);
        }
        self
    }

    /// Container options, if this is a `container_selection` field
    pub fn container_options(&self) -> Option<&[ContainerOption]> {
        match &self.kind {
            FieldKind::ContainerSelection { options, .. } => Some(options),
            _ => None,
        }
    }

    /// The container revealed by `selected`, if any option matches
    pub fn container_for(&self, selected: &str) -> Option<&Container> {
        self.container_options()?
            .iter()
            .find(|option| option.value == selected)
            .map(|option| &option.container)
    }
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collapsible {
    pub init_collapsed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<Collapsible>,
    pub elements: Vec<FormFieldSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormLayout {
    pub sections: Vec<Section>,
}

/// A field spec together with the option that reveals it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedField<'a> {
    pub spec: &'a FormFieldSpec,
    /// `(owning field, option value)` for fields inside a container
    pub revealed_by: Option<(Field, &'static str)>,
}

impl FormLayout {
    /// Every field spec in document order, nested ones right after their owner
    pub fn fields(&self) -> Vec<PlacedField<'_>> {
        let mut placed = Vec::new();
        for section in &self.sections {
            for spec in &section.elements {
                placed.push(PlacedField {
                    spec,
                    revealed_by: None,
                });
                for option in spec.container_options().unwrap_or_default() {
                    for nested in option.container.elements() {
                        placed.push(PlacedField {
                            spec: nested,
                            revealed_by: Some((spec.prop_name, option.value)),
                        });
                    }
                }
            }
        }
        placed
    }

    pub fn find(&self, field: Field) -> Option<&FormFieldSpec> {
        self.fields()
            .into_iter()
            .find(|placed| placed.spec.prop_name == field)
            .map(|placed| placed.spec)
    }

    /// Fields that belong to the active form state for `values`.
    ///
    /// Top-level fields are always active. A nested field is active only
    /// when its owner's current value selects the option holding it.
    pub fn active_fields(&self, values: &FormValues) -> Vec<Field> {
        self.fields()
            .into_iter()
            .filter(|placed| match placed.revealed_by {
                None => true,
                Some((owner, option)) => {
                    values.get(owner).and_then(|v| v.as_str()) == Some(option)
                }
            })
            .map(|placed| placed.spec.prop_name)
            .collect()
    }
}
