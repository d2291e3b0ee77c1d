use crate::error::InfoError;
use crate::identity::{self, EepromReader};
use crate::logging::CLIENT;
use crate::runtime::env::Environment;
use log::debug;

/// What `identity-info` should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoRequest {
    /// Full multi-line report.
    Report,
    /// Revision tag only (`r4`).
    Revision,
    /// Store the model string in the named variable.
    StoreModel(String),
}

impl InfoRequest {
    /// Map the `-r` / `-v VAR` flags. `-r` wins when both are given.
    pub fn from_flags(revision_only: bool, var: Option<String>) -> Self {
        match (revision_only, var) {
            (true, _) => InfoRequest::Revision,
            (false, Some(name)) => InfoRequest::StoreModel(name),
            (false, None) => InfoRequest::Report,
        }
    }
}

/// Decode the board identity and serve `request`. Returns the text to print,
/// `None` when the result went to `env` instead.
pub fn identity_info<E, V>(eeprom: &E, env: &mut V, request: &InfoRequest) -> Result<Option<String>, InfoError>
where
    E: EepromReader,
    V: Environment + ?Sized,
{
    let identity = identity::decode(eeprom)?;
    match request {
        InfoRequest::Report => Ok(Some(identity.report())),
        InfoRequest::Revision => Ok(Some(format!("{}\n", identity.revision_tag()))),
        InfoRequest::StoreModel(name) => {
            let model = identity.model_string();
            env.set_var(name, &model).map_err(|source| InfoError::Environment {
                name: name.clone(),
                source,
            })?;
            debug!(target: CLIENT, "{} = {}", name, model);
            Ok(None)
        }
    }
}
