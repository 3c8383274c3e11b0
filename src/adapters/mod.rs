pub mod io;
pub mod value_mapper;

pub use io::{load_document, render, IoResult, ProvisioningError};
pub use value_mapper::{
    add_props_for_save, get_init_values_from_provision, get_instance_type_value, is_edit_mode,
    is_restart_required, prepare_provision_values_for_save,
};
