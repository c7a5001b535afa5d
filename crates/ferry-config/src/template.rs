use ferry_core::LoadJobTemplate;

use crate::error::ConfigResult;

/// Parse a load-job template from a TOML string.
pub fn parse_template(toml_str: &str) -> ConfigResult<LoadJobTemplate> {
    let template: LoadJobTemplate = toml::from_str(toml_str)?;
    Ok(template)
}
