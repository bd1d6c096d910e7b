mod file;
mod page;
mod stac;

pub use file::FileCatalog;
pub use page::{CollectionsPage, Link};
pub use stac::StacApiCatalog;

use crate::error::Result;
use crate::model::Collection;

pub type Collections<'a> = Box<dyn Iterator<Item = Result<Collection>> + 'a>;

/// Source of STAC collections, in the order the catalog lists them.
pub trait Catalog {
    fn collections(&self) -> Result<Collections<'_>>;
}
