pub mod criteria;
pub mod paginate;
pub mod predicate;
pub mod sort;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use criteria::{parse_criteria, parse_optional_number};
pub use paginate::{execute, total_pages, ResultPage};
pub use predicate::{Filter, Predicate, QueryDescriptor, Window};
pub use sort::SortSpec;
pub use traits::{Edit, PropertyStore};
pub use types::{SearchCriteria, SortKey};
