//! Structural type validation of evaluated arguments.

use crate::arguments::{ArgumentCollection, Arguments};
use crate::errors::{type_mismatch, ComponentError};

/// Check evaluated argument values against their declared types.
///
/// Arguments declared `mixed`, and values still equal to the declared
/// default, are not checked. Undeclared names are ignored.
pub fn validate_arguments(
    definitions: &ArgumentCollection,
    arguments: &Arguments,
) -> Result<(), ComponentError> {
    for definition in definitions.iter() {
        let spec = definition.type_spec();
        if spec.is_mixed() {
            continue;
        }
        let Some(value) = arguments.get(definition.name()) else {
            continue;
        };
        if value == definition.default_value() {
            continue;
        }
        if !spec.accepts(value) {
            return Err(type_mismatch(definition.name(), &spec.to_string(), value));
        }
    }
    Ok(())
}
