use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<StatusInfo> {
        self.load_index()?;

        Status::new(self).initialize(self.index())
    }
}
