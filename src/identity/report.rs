use super::record::BoardIdentity;

impl BoardIdentity {
    /// `rN`, as printed by `identity-info -r`.
    pub fn revision_tag(&self) -> String {
        format!("r{}", self.record.revision)
    }

    pub fn model_string(&self) -> String {
        format!(
            "Model: r{}, RAM {}MB, Flash {}MB",
            self.record.revision, self.model.ram_mb, self.model.flash_mb
        )
    }

    /// Order code printed on the board label, e.g. `DBB256R512F-R4`.
    pub fn product_code(&self) -> String {
        format!("DBB{}R{}F-R{}", self.model.ram_mb, self.model.flash_mb, self.record.revision)
    }

    pub fn report(&self) -> String {
        let r = &self.record;
        format!(
            "Code:      {}\n\
             Revision:  {}\n\
             RAM:       {}MB\n\
             Flash:     {}MB\n\
             Protocol:  {}\n\
             Tested on: {} (Unix epoch time)\n\
             \n\
             MAC:       {}\n\
             UUID:      {}\n",
            self.product_code(),
            r.revision,
            self.model.ram_mb,
            self.model.flash_mb,
            r.protocol,
            r.tested_at,
            r.mac,
            r.uuid,
        )
    }
}
