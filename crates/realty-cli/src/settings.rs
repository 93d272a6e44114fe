use std::path::Path;

use realty_generate::GeneratorProfile;

use crate::CliError;

/// Load a generator profile from a TOML file.
///
/// Keys left out of the file keep their defaults.
pub fn load_profile(path: &Path) -> Result<GeneratorProfile, CliError> {
    let content = std::fs::read_to_string(path)?;
    let profile: GeneratorProfile = toml::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}
