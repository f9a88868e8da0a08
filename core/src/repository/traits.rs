use crate::error::Result;
use crate::model::hierarchy::Department;

pub trait HierarchyRepository {
    /// The full department → HOD → faculty tree for one session.
    fn load(&self) -> Result<Vec<Department>>;
}
